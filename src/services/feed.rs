// src/services/feed.rs

//! Feed assembler.
//!
//! Maps records to RSS 2.0 items and serializes the channel with quick-xml.
//! Channel fields come from [`FeedMetadata`], never from scraped data.

use std::io::Write;

use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{AppError, Result};
use crate::models::{ExhibitionRecord, FeedMetadata};

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Builds the HTML body of a feed item.
///
/// The information paragraph is only present when the record has a date hint.
pub fn render_item_body(record: &ExhibitionRecord) -> String {
    let mut body = format!("<h3>{}</h3>\n", escape(&record.title));
    if record.has_date_hint() {
        body.push_str(&format!(
            "<p><strong>Información:</strong> {}</p>\n",
            escape(&record.date_hint)
        ));
    }
    body.push_str(&format!("<p>{}</p>\n", escape(&record.description)));
    body.push_str(&format!(
        "<p><a href=\"{}\">Visitar exposición en web oficial</a></p>\n",
        escape(&record.link)
    ));
    body.push_str("<hr>\n<small>Actualizado automáticamente cada semana</small>");
    body
}

/// Serializes exhibition records as an RSS 2.0 document.
#[derive(Debug, Clone)]
pub struct FeedAssembler {
    metadata: FeedMetadata,
}

impl FeedAssembler {
    pub fn new(metadata: FeedMetadata) -> Self {
        Self { metadata }
    }

    /// Serialize `records` in order into a UTF-8 RSS document.
    pub fn assemble(&self, records: &[ExhibitionRecord], built_at: DateTime<Utc>) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write_event(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
        )?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:atom", ATOM_NS));
        write_event(&mut writer, Event::Start(rss))?;
        write_event(&mut writer, Event::Start(BytesStart::new("channel")))?;

        let meta = &self.metadata;
        write_text_element(&mut writer, "title", &meta.title)?;
        write_text_element(&mut writer, "link", &meta.link)?;
        write_text_element(&mut writer, "description", &meta.description)?;

        let mut self_link = BytesStart::new("atom:link");
        self_link.push_attribute(("href", meta.feed_url.as_str()));
        self_link.push_attribute(("rel", "self"));
        self_link.push_attribute(("type", "application/rss+xml"));
        write_event(&mut writer, Event::Empty(self_link))?;

        write_text_element(&mut writer, "language", &meta.language)?;
        write_text_element(&mut writer, "lastBuildDate", &built_at.to_rfc2822())?;
        write_text_element(
            &mut writer,
            "generator",
            concat!("exhibition-feed ", env!("CARGO_PKG_VERSION")),
        )?;

        for record in records {
            self.write_item(&mut writer, record)?;
        }

        write_event(&mut writer, Event::End(BytesEnd::new("channel")))?;
        write_event(&mut writer, Event::End(BytesEnd::new("rss")))?;

        let mut document = String::from_utf8(writer.into_inner()).map_err(AppError::xml)?;
        document.push('\n');
        Ok(document)
    }

    fn write_item<W: Write>(&self, writer: &mut Writer<W>, record: &ExhibitionRecord) -> Result<()> {
        write_event(writer, Event::Start(BytesStart::new("item")))?;
        write_text_element(writer, "title", &record.title)?;
        write_text_element(writer, "link", &record.link)?;
        write_text_element(writer, "description", &render_item_body(record))?;
        write_text_element(writer, "pubDate", &record.published_at.to_rfc2822())?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "false"));
        write_event(writer, Event::Start(guid))?;
        write_event(writer, Event::Text(BytesText::new(&record.id)))?;
        write_event(writer, Event::End(BytesEnd::new("guid")))?;

        for category in &self.metadata.categories {
            write_text_element(writer, "category", category)?;
        }
        write_event(writer, Event::End(BytesEnd::new("item")))
    }
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(AppError::xml)
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(&strip_control_chars(text))))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}

/// Drop characters XML 1.0 cannot carry (C0 controls other than tab, LF, CR).
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || c >= '\u{20}')
        .collect()
}
