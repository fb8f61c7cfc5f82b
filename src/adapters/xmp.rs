//! Marker source backed by Adobe XMP sidecar files.
//!
//! Premiere and Audition store clip markers as `rdf:li` items inside an
//! `xmpDM:markers` sequence, e.g.
//!
//! ```xml
//! <xmpDM:markers>
//!   <rdf:Seq>
//!     <rdf:li xmpDM:startTime="1234" xmpDM:comment="Q) Question&#xA;* yes&#xA;- no"/>
//!     <rdf:li rdf:parseType="Resource">
//!       <xmpDM:startTime>5678</xmpDM:startTime>
//!       <xmpDM:name>Chapter 2</xmpDM:name>
//!     </rdf:li>
//!   </rdf:Seq>
//! </xmpDM:markers>
//! ```
//!
//! Fields may be attributes or child elements, and elements are matched by local
//! name, so any namespace prefix bound to the dynamic media schema works.

use crate::domain::model::Marker;
use crate::domain::ports::MarkerSource;
use crate::utils::error::{AssessmentError, Result};
use async_trait::async_trait;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Reader;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct XmpMarkerSource;

impl XmpMarkerSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MarkerSource for XmpMarkerSource {
    async fn markers(&self, path: &Path) -> Result<Vec<Marker>> {
        let xml = tokio::fs::read_to_string(path).await?;
        let markers =
            parse_xmp_markers(&xml).map_err(|e| AssessmentError::MarkerSourceError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        tracing::debug!("{}: {} marker(s)", path.display(), markers.len());
        Ok(markers)
    }
}

/// Extract every marker from an XMP document, in document order.
pub fn parse_xmp_markers(xml: &str) -> std::result::Result<Vec<Marker>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut parser = MarkerParser::default();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => parser.handle_start(e)?,
            Event::Empty(ref e) => parser.handle_empty(e)?,
            Event::Text(ref e) => parser.handle_text(e)?,
            Event::End(ref e) => parser.handle_end(e),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(parser.markers)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerField {
    StartTime,
    Comment,
    Name,
}

impl MarkerField {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"startTime" => Some(Self::StartTime),
            b"comment" => Some(Self::Comment),
            b"name" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Fields collected for one top-level marker item.
#[derive(Debug, Default)]
struct MarkerItem {
    start_time: Option<String>,
    comment: Option<String>,
    name: Option<String>,
}

impl MarkerItem {
    fn slot(&mut self, field: MarkerField) -> &mut Option<String> {
        match field {
            MarkerField::StartTime => &mut self.start_time,
            MarkerField::Comment => &mut self.comment,
            MarkerField::Name => &mut self.name,
        }
    }

    fn read_attributes(&mut self, e: &BytesStart<'_>) -> std::result::Result<(), quick_xml::Error> {
        for attr in e.attributes().flatten() {
            if let Some(field) = MarkerField::from_local_name(attr.key.local_name().as_ref()) {
                *self.slot(field) = Some(attr.unescape_value()?.into_owned());
            }
        }
        Ok(())
    }

    fn into_marker(self) -> Option<Marker> {
        // 空的 comment 視同沒有，改用 name
        let content = self
            .comment
            .filter(|c| !c.is_empty())
            .or_else(|| self.name.filter(|n| !n.is_empty()));
        let start_time = self
            .start_time
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if start_time.is_none() && content.is_none() {
            return None;
        }

        Some(Marker {
            content: content.unwrap_or_default(),
            // 省略 startTime 代表片段起點
            timecode: start_time.unwrap_or_else(|| "0".to_string()),
        })
    }
}

/// Event-driven state machine over the `markers` sequences of an XMP packet.
#[derive(Debug, Default)]
struct MarkerParser {
    markers: Vec<Marker>,
    /// Open `markers` elements.
    markers_depth: usize,
    /// Open `li` elements inside the current `markers`; 1 means the marker item itself.
    item_depth: usize,
    item: Option<MarkerItem>,
    /// Field element whose text is being collected.
    field: Option<MarkerField>,
    /// Elements opened inside the field element (e.g. an `rdf:Alt` language list).
    field_depth: usize,
}

impl MarkerParser {
    fn handle_start(&mut self, e: &BytesStart<'_>) -> std::result::Result<(), quick_xml::Error> {
        if self.field.is_some() {
            self.field_depth += 1;
            return Ok(());
        }

        let name = e.local_name();
        if name.as_ref() == b"markers" {
            self.markers_depth += 1;
            return Ok(());
        }
        if self.markers_depth == 0 {
            return Ok(());
        }

        if name.as_ref() == b"li" {
            if self.item_depth == 0 {
                let mut item = MarkerItem::default();
                item.read_attributes(e)?;
                self.item = Some(item);
            }
            self.item_depth += 1;
            return Ok(());
        }

        // 巢狀清單（cuePointParams）內的欄位不屬於這個 marker
        if self.item_depth != 1 {
            return Ok(());
        }
        if let Some(item) = self.item.as_mut() {
            item.read_attributes(e)?;
            if let Some(field) = MarkerField::from_local_name(name.as_ref()) {
                *item.slot(field) = Some(String::new());
                self.field = Some(field);
            }
        }
        Ok(())
    }

    fn handle_empty(&mut self, e: &BytesStart<'_>) -> std::result::Result<(), quick_xml::Error> {
        if self.markers_depth == 0 || self.field.is_some() {
            return Ok(());
        }

        let name = e.local_name();
        if name.as_ref() == b"li" {
            if self.item_depth == 0 {
                let mut item = MarkerItem::default();
                item.read_attributes(e)?;
                self.markers.extend(item.into_marker());
            }
            return Ok(());
        }

        if self.item_depth != 1 {
            return Ok(());
        }
        if let Some(item) = self.item.as_mut() {
            item.read_attributes(e)?;
            if let Some(field) = MarkerField::from_local_name(name.as_ref()) {
                item.slot(field).get_or_insert_with(String::new);
            }
        }
        Ok(())
    }

    fn handle_text(&mut self, e: &BytesText<'_>) -> std::result::Result<(), quick_xml::Error> {
        let (Some(field), Some(item)) = (self.field, self.item.as_mut()) else {
            return Ok(());
        };
        let text = e.unescape()?;
        item.slot(field)
            .get_or_insert_with(String::new)
            .push_str(&text);
        Ok(())
    }

    fn handle_end(&mut self, e: &BytesEnd<'_>) {
        if self.field.is_some() {
            if self.field_depth > 0 {
                self.field_depth -= 1;
            } else {
                self.field = None;
            }
            return;
        }

        let name = e.local_name();
        if name.as_ref() == b"markers" {
            self.markers_depth = self.markers_depth.saturating_sub(1);
            return;
        }
        if self.markers_depth == 0 || name.as_ref() != b"li" {
            return;
        }

        self.item_depth = self.item_depth.saturating_sub(1);
        if self.item_depth == 0 {
            if let Some(item) = self.item.take() {
                self.markers.extend(item.into_marker());
            }
        }
    }
}
