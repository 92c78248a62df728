use arachunk::{
	decode::{decode_chunk, error::ErrorKind},
	encode::{encode_chunk, Encoder},
	xml::{Document, Element, Indent},
	ArchiveDictionary, ArchiveEntry, PlugInDescriptor,
};

const IXML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- written by some recorder -->
<BWFXML>
	<IXML_VERSION>2.10</IXML_VERSION>
	<PROJECT>Rock &amp; Roll</PROJECT>
	<SCENE>12A</SCENE>
	<TAKE>3</TAKE>
	<NOTE><![CDATA[mic <1> was off]]></NOTE>
	<ARA>
		<audioSources>
			<audioSource>
				<documentArchiveID>com.example.old</documentArchiveID>
				<openAutomatically>true</openAutomatically>
				<persistentID>x</persistentID>
				<archiveData>AAEC</archiveData>
			</audioSource>
		</audioSources>
		<vendorExtension note='kept only if ARA is not rewritten'/>
	</ARA>
	<TRACK_LIST>
		<TRACK_COUNT>2</TRACK_COUNT>
		<TRACK><CHANNEL_INDEX>1</CHANNEL_INDEX><NAME>Boom</NAME></TRACK>
		<TRACK><CHANNEL_INDEX>2</CHANNEL_INDEX><NAME>Lav</NAME></TRACK>
	</TRACK_LIST>
	<USER custom="attr">free text</USER>
	<EMPTY />
</BWFXML>
"#;

fn archives() -> ArchiveDictionary {
	ArchiveDictionary::from_entries([
		ArchiveEntry::new("com.example.new", "source-1", (0..=255).collect::<Vec<u8>>())
			.open_automatically(true)
			.with_suggested_plug_in(
				PlugInDescriptor::new("Example", "Example Inc.")
					.with_lowest_supported_version("2.1".parse().unwrap()),
			),
		ArchiveEntry::new("com.example.other", "source-1", Vec::new()),
	])
	.unwrap()
}

/// Every element of the root except ARA, as written.
fn unrelated(text: &str) -> Vec<String> {
	let document = Document::parse(text).unwrap();
	document
		.root()
		.unwrap()
		.child_elements()
		.filter(|element| element.name != "ARA")
		.map(Element::to_string)
		.collect()
}

#[test]
fn existing_archives_are_read() {
	let dict = decode_chunk(IXML).unwrap();
	assert_eq!(dict.ids().collect::<Vec<_>>(), vec!["com.example.old"]);
	assert_eq!(dict.get("com.example.old").unwrap().payload, vec![0, 1, 2]);
}

#[test]
fn unrelated_elements_are_untouched() {
	let text = encode_chunk(&archives(), Some(IXML)).unwrap();
	assert_eq!(unrelated(&text), unrelated(IXML));
	assert_eq!(decode_chunk(&text).unwrap(), archives());
}

#[test]
fn only_the_ara_element_changes() {
	let text = encode_chunk(&archives(), Some(IXML)).unwrap();

	let start = IXML.find("<ARA>").unwrap();
	let end = IXML.find("</ARA>").unwrap() + "</ARA>".len();
	let (before, after) = (&IXML[..start], &IXML[end..]);

	assert!(text.starts_with(before));
	assert!(text.ends_with(after));
	assert!(!text.contains("vendorExtension"));
}

#[test]
fn position_is_kept() {
	let text = encode_chunk(&archives(), Some(IXML)).unwrap();
	let document = Document::parse(&text).unwrap();
	let names: Vec<_> = document
		.root()
		.unwrap()
		.child_elements()
		.map(|element| element.name.clone())
		.collect();
	assert_eq!(
		names,
		vec![
			"IXML_VERSION",
			"PROJECT",
			"SCENE",
			"TAKE",
			"NOTE",
			"ARA",
			"TRACK_LIST",
			"USER",
			"EMPTY"
		]
	);
}

#[test]
fn rewriting_same_archives_is_idempotent() {
	let mut encoder = Encoder::new();
	encoder.set_indent(Indent::Tabs);
	let once = encoder.encode(&archives(), Some(IXML)).unwrap();
	let twice = encoder
		.encode(&decode_chunk(&once).unwrap(), Some(&once))
		.unwrap();
	assert_eq!(once, twice);
}

#[test]
fn indented_subtree_fits_in() {
	let mut encoder = Encoder::new();
	encoder.set_indent(Indent::Tabs);
	let text = encoder
		.encode(&ArchiveDictionary::new(), Some(IXML))
		.unwrap();
	assert!(text.contains("\t<ARA>\n\t\t<audioSources></audioSources>\n\t</ARA>\n\t<TRACK_LIST>"));
}

#[test]
fn removing_all_archives_keeps_an_empty_dictionary() {
	let text = encode_chunk(&ArchiveDictionary::new(), Some(IXML)).unwrap();
	assert!(decode_chunk(&text).unwrap().is_empty());
	assert_eq!(unrelated(&text), unrelated(IXML));
}

#[test]
fn merge_then_encode() {
	let existing = decode_chunk(IXML).unwrap();
	let merged = existing.merge(archives()).unwrap();
	let text = encode_chunk(&merged, Some(IXML)).unwrap();
	assert_eq!(
		decode_chunk(&text).unwrap().ids().collect::<Vec<_>>(),
		vec!["com.example.old", "com.example.new", "com.example.other"]
	);
}

#[test]
fn merge_conflict_is_reported() {
	let existing = decode_chunk(IXML).unwrap();
	let err = existing.clone().merge(existing).unwrap_err();
	assert_eq!(err.kind(), Some(ErrorKind::DuplicateArchiveId));
}

#[test]
fn malformed_unrelated_content_fails_encode() {
	let broken = IXML.replace("</TAKE>", "</TAKES>");
	let err = encode_chunk(&archives(), Some(&broken)).unwrap_err();
	assert_eq!(err.kind(), Some(ErrorKind::MalformedXml));
}
