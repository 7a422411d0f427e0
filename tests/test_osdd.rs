use insta::assert_snapshot;
use rstest::rstest;

use opensearch_xml::{
    encode_osdd, encode_osdd_to_string, encode_osdd_to_writer, parse_osdd, Description,
    ErrorKind, ExtensionName, HttpMethod, Limit, SerializeOptions, SyndicationRight,
};

const SAMPLE: &[u8] = include_bytes!("data/osdd.xml");

fn indented() -> SerializeOptions {
    SerializeOptions {
        indent: Some(2),
        declaration: false,
    }
}

#[test]
fn test_parse_sample() {
    let description = parse_osdd(SAMPLE).unwrap();
    assert_eq!(description.short_name, "Web Search");
    assert_eq!(description.description, "Use Example.com to search the Web.");
    assert_eq!(description.tags, vec!["example", "web"]);
    assert_eq!(description.contact.as_deref(), Some("admin@example.com"));
    assert_eq!(description.long_name.as_deref(), Some("Example.com Web Search"));
    assert_eq!(description.images.len(), 2);
    assert_eq!(description.images[1].width, Some(16));
    assert_eq!(description.syndication_right, SyndicationRight::Open);
    assert!(!description.adult_content);
    assert_eq!(description.languages, vec!["en-us"]);
    assert_eq!(description.input_encodings, vec!["UTF-8"]);
    assert_eq!(description.output_encodings, vec!["UTF-8"]);

    let search = &description.urls[0];
    assert_eq!(
        search.template,
        "http://example.com/?q={searchTerms}&pw={startPage?}&bbox={geo:box?}&format=atom"
    );
    assert_eq!(search.rel, "results");
    assert_eq!(search.index_offset, 1);
    assert_eq!(search.page_offset, 0);
    assert_eq!(search.method, HttpMethod::Get);
    assert_eq!(search.parameters.len(), 4);
    assert_eq!(search.parameters[1].max_inclusive, Some(Limit::Float(100.5)));
    assert_eq!(
        search.parameters[3].min_exclusive,
        Some(Limit::Text("P1D".to_string()))
    );
    assert_eq!(search.parameters[3].maximum, 4);
    assert_eq!(search.parameters[2].options.len(), 2);

    let suggestions = &description.urls[1];
    assert_eq!(suggestions.rel, "suggestions");
    assert_eq!(suggestions.method, HttpMethod::Post);
    assert_eq!(
        suggestions.enctype.as_deref(),
        Some("application/x-www-form-urlencoded")
    );

    let query = &description.queries[0];
    assert_eq!(
        query
            .extra_parameters
            .get(&ExtensionName::new(
                "http://a9.com/-/opensearch/extensions/time/1.0/",
                "start"
            ))
            .map(String::as_str),
        Some("2020-01-01")
    );
}

#[test]
fn test_encode_sample() {
    let description = parse_osdd(SAMPLE).unwrap();
    let xml = encode_osdd_to_string(&description, &indented()).unwrap();
    assert_snapshot!(xml.trim_end(), @r#"
    <OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/" xmlns:parameters="http://a9.com/-/spec/opensearch/extensions/parameters/1.0/" xmlns:n0="http://a9.com/-/opensearch/extensions/geo/1.0/" xmlns:n1="http://a9.com/-/opensearch/extensions/time/1.0/">
      <ShortName>Web Search</ShortName>
      <Description>Use Example.com to search the Web.</Description>
      <Url template="http://example.com/?q={searchTerms}&amp;pw={startPage?}&amp;bbox={geo:box?}&amp;format=atom" type="application/atom+xml" pageOffset="0">
        <parameters:Parameter name="q" value="{searchTerms}" minimum="0" title="Search terms"/>
        <parameters:Parameter name="pw" value="{startPage?}" minInclusive="1" maxInclusive="100.5" step="1"/>
        <parameters:Parameter name="format" value="atom" pattern="atom|rss">
          <parameters:Option value="atom" label="Atom"/>
          <parameters:Option value="rss"/>
        </parameters:Parameter>
        <parameters:Parameter name="bbox" value="{geo:box?}" maximum="4" minExclusive="P1D"/>
      </Url>
      <Url template="http://example.com/suggest?q={searchTerms}" type="application/x-suggestions+json" rel="suggestions" parameters:method="POST" parameters:enctype="application/x-www-form-urlencoded"/>
      <Tags>example web</Tags>
      <Image width="64" height="64" type="image/png">http://example.com/websearch.png</Image>
      <Image width="16" height="16" type="image/vnd.microsoft.icon">http://example.com/websearch.ico</Image>
      <LongName>Example.com Web Search</LongName>
      <Contact>admin@example.com</Contact>
      <Query role="example" searchTerms="cat" n0:box="-10,-10,10,10" n1:start="2020-01-01"/>
      <Developer>Example.com Development Team</Developer>
      <Attribution>Search data Copyright 2005, Example.com, Inc., All Rights Reserved</Attribution>
      <Language>en-us</Language>
    </OpenSearchDescription>
    "#);
}

#[test]
fn test_minimal_encodes_required_only() {
    let description = Description::new("Web", "Web search");
    let root = encode_osdd(&description);
    let names = root
        .child_elements()
        .map(|child| child.name.local_name.clone())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["ShortName", "Description"]);
}

#[test]
fn test_encode_to_writer() {
    let description = parse_osdd(SAMPLE).unwrap();
    let options = SerializeOptions {
        indent: None,
        declaration: true,
    };
    let mut buf = Vec::new();
    encode_osdd_to_writer(&description, &options, &mut buf).unwrap();
    let written = String::from_utf8(buf).unwrap();
    assert!(written.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><OpenSearchDescription "#));
    assert_eq!(written, encode_osdd_to_string(&description, &options).unwrap());
}

#[test]
fn test_xml_namespace_extension() {
    let xml = br#"<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/"><ShortName>a</ShortName><Description>b</Description><Query role="example" xml:lang="de"/></OpenSearchDescription>"#;
    let description = parse_osdd(xml).unwrap();
    let encoded = encode_osdd_to_string(&description, &SerializeOptions::default()).unwrap();
    assert!(encoded.contains(r#"<Query role="example" xml:lang="de"/>"#), "{}", encoded);
    assert_eq!(parse_osdd(encoded.as_bytes()).unwrap(), description);
}

#[rstest]
#[case("<ShortName>a</ShortName>", ErrorKind::Structural)]
#[case("<ShortName>a</ShortName><Description>b</Description><Url template=\"t\" type=\"text/html\" pageOffset=\"1.5\"/>", ErrorKind::Format)]
#[case("<ShortName>a</ShortName><Description>b</Description><Url template=\"t\" type=\"text/html\" method=\"PATCH\"/>", ErrorKind::Enum)]
#[case("<ShortName>a</ShortName><Description>b</Description><Image height=\"x\">http://example.com/i.png</Image>", ErrorKind::Format)]
#[case("<ShortName>a</ShortName><Description>b</Description></Oops>", ErrorKind::MalformedXml)]
fn test_invalid_documents(#[case] body: &str, #[case] kind: ErrorKind) {
    let xml = format!(
        r#"<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/">{}</OpenSearchDescription>"#,
        body
    );
    assert_eq!(parse_osdd(xml.as_bytes()).unwrap_err().kind(), kind);
}

#[test]
fn test_adult_content_values() {
    for (raw, expected) in [("true", true), ("FALSE", false), ("maybe", true), ("no", false)] {
        let xml = format!(
            r#"<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/"><ShortName>a</ShortName><Description>b</Description><AdultContent>{}</AdultContent></OpenSearchDescription>"#,
            raw
        );
        assert_eq!(parse_osdd(xml.as_bytes()).unwrap().adult_content, expected, "{}", raw);
    }
}
