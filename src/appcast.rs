use crate::pretty;
use chrono::DateTime;
use chrono::Utc;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::Writer;
use rss::Channel;
use rss::Item;
use std::io::Write;

pub const SPARKLE_NAMESPACE: &str = "http://www.andymatuschak.org/xml-namespaces/sparkle";
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

// Declared on the root in this order.
const NAMESPACES: [(&str, &str); 2] = [("sparkle", SPARKLE_NAMESPACE), ("dc", DC_NAMESPACE)];
const LANGUAGE: &str = "en";
const ENCLOSURE_TYPE: &str = "application/octet-stream";
// Always UTC, so the zone is spelled out rather than using %z.
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Everything the feed says about one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: String,
    pub release_notes_url: String,
    pub windows: Option<Variant>,
    pub macos: Option<Variant>,
    pub title: String,
    pub link: String,
    pub description: String,
}

/// A downloadable build of the release for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub url: String,
    /// Base64 EdDSA signature of the download.
    pub signature: String,
    /// Size of the download in bytes.
    pub length: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
}

impl Platform {
    /// Value of the `sparkle:os` attribute.
    pub fn os(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
        }
    }
}

impl Release {
    /// The present variants, Windows first.
    pub fn variants(&self) -> impl Iterator<Item = (Platform, &Variant)> {
        [
            (Platform::Windows, self.windows.as_ref()),
            (Platform::MacOs, self.macos.as_ref()),
        ]
        .into_iter()
        .filter_map(|(platform, variant)| variant.map(|variant| (platform, variant)))
    }
}

/// Renders the appcast for `release`, stamped with `pub_date`.
pub fn build(release: &Release, pub_date: DateTime<Utc>) -> anyhow::Result<String> {
    let mut channel = Channel::default();
    channel.set_title(&release.title);
    channel.set_link(&release.link);
    channel.set_description(&release.description);
    channel.set_language(LANGUAGE.to_owned());

    let mut item = Item::default();
    item.set_title(format!("Version {}", release.version));
    item.set_pub_date(pub_date.format(PUB_DATE_FORMAT).to_string());
    channel.items = vec![item];

    let mut writer = Writer::new(Vec::new());
    write_feed(&mut writer, &channel, release)?;
    let rendered = String::from_utf8(writer.into_inner())?;
    pretty::indent(&rendered)
}

// Element and attribute order is fixed for Sparkle clients. `rss` keeps
// extensions in name-keyed maps, so the feed is written out by hand.
fn write_feed<W: Write>(
    writer: &mut Writer<W>,
    channel: &Channel,
    release: &Release,
) -> quick_xml::Result<()> {
    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    for (prefix, namespace) in NAMESPACES {
        rss.push_attribute((format!("xmlns:{}", prefix).as_str(), namespace));
    }
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text(writer, "title", &channel.title)?;
    write_text(writer, "link", &channel.link)?;
    write_text(writer, "description", &channel.description)?;
    if let Some(language) = &channel.language {
        write_text(writer, "language", language)?;
    }
    for item in &channel.items {
        write_item(writer, item, release)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;
    Ok(())
}

fn write_item<W: Write>(
    writer: &mut Writer<W>,
    item: &Item,
    release: &Release,
) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;
    if let Some(title) = &item.title {
        write_text(writer, "title", title)?;
    }
    if let Some(pub_date) = &item.pub_date {
        write_text(writer, "pubDate", pub_date)?;
    }
    write_text(writer, "sparkle:releaseNotesLink", &release.release_notes_url)?;
    for (platform, variant) in release.variants() {
        writer.write_event(Event::Empty(enclosure(&release.version, platform, variant)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn enclosure(version: &str, platform: Platform, variant: &Variant) -> BytesStart<'static> {
    let mut enclosure = BytesStart::new("enclosure");
    enclosure.push_attribute(("url", variant.url.as_str()));
    enclosure.push_attribute(("sparkle:version", version));
    enclosure.push_attribute(("sparkle:os", platform.os()));
    enclosure.push_attribute(("sparkle:edSignature", variant.signature.as_str()));
    if let Some(length) = variant.length {
        enclosure.push_attribute(("length", length.to_string().as_str()));
    }
    enclosure.push_attribute(("type", ENCLOSURE_TYPE));
    enclosure
}

fn write_text<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
