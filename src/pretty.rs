use quick_xml::events::BytesDecl;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use quick_xml::Writer;

const INDENT_SIZE: usize = 2;

/// Re-parses `xml` and writes it back indented by two spaces.
///
/// The output always starts with a plain `<?xml version="1.0"?>` declaration.
/// Elements without content are collapsed to `<name/>` and whitespace-only
/// text is dropped.
pub fn indent(xml: &str) -> anyhow::Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    let mut open: Option<BytesStart<'static>> = None;
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;

    loop {
        let event = reader.read_event()?;
        match event {
            Event::Eof => break,
            Event::Text(ref text) if text.iter().all(u8::is_ascii_whitespace) => continue,
            _ => {}
        }

        // A start tag is held back until we know whether anything is inside it.
        if let Some(start) = open.take() {
            if let Event::End(_) = event {
                writer.write_event(Event::Empty(start))?;
                continue;
            }
            writer.write_event(Event::Start(start))?;
        }

        match event {
            Event::Start(start) => open = Some(start.into_owned()),
            Event::Decl(_) => {}
            event => writer.write_event(event)?,
        }
    }
    if let Some(start) = open {
        anyhow::bail!(
            "Unclosed element <{}>.",
            String::from_utf8_lossy(start.name().as_ref())
        );
    }

    let pretty = String::from_utf8(writer.into_inner())?;
    Ok(pretty
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}
