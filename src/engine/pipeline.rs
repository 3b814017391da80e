use std::collections::BTreeMap;

use crate::error::Result;
use crate::lex::strip;
use crate::net::http::HttpClient;
use crate::net::url::{ParsedUrl, Scheme};
use crate::render::layout::{layout, DisplayList, HSTEP, VSTEP};

/// Result of loading a document: response headers, the stripped text, and
/// the display list cached for the viewport until the next navigation.
pub struct Page {
    pub headers: BTreeMap<String, String>,
    pub text: String,
    pub display_list: DisplayList,
}

/// The load pipeline: Parse URL → Fetch → Strip → Layout.
///
/// Runs once per navigation, synchronously; scrolling afterwards only
/// re-clips the cached display list and never re-enters this pipeline.
pub struct Engine {
    client: HttpClient,
    viewport_width: i32,
    hstep: i32,
    vstep: i32,
}

impl Engine {
    pub fn new(viewport_width: i32) -> Self {
        Self {
            client: HttpClient::new(),
            viewport_width,
            hstep: HSTEP,
            vstep: VSTEP,
        }
    }

    /// Override the grid advances (mainly for tests).
    pub fn with_grid(mut self, hstep: i32, vstep: i32) -> Self {
        self.hstep = hstep;
        self.vstep = vstep;
        self
    }

    /// Load a URL through the full pipeline.
    ///
    /// `file` URLs are read straight off the filesystem and never touch the
    /// network stack; the opaque path from the parser is handed to the OS
    /// as written.
    pub fn load(&self, url: &str) -> Result<Page> {
        self.load_with_headers(url, &BTreeMap::new())
    }

    /// Load a URL, sending extra request headers along with the mandatory
    /// ones. The extras are ignored for `file` URLs.
    pub fn load_with_headers(
        &self,
        url: &str,
        extra_headers: &BTreeMap<String, String>,
    ) -> Result<Page> {
        let target = ParsedUrl::parse(url)?;
        log::info!("loading {url}");

        match target.scheme {
            Scheme::File => {
                let body = std::fs::read_to_string(&target.path)?;
                Ok(self.process_body(&body))
            }
            _ => {
                let response = self.client.fetch(url, extra_headers)?;
                let mut page = self.process_body(&response.body);
                page.headers = response.headers;
                Ok(page)
            }
        }
    }

    /// Strip and lay out a raw document body. This is the fetchless tail of
    /// the pipeline, usable directly in tests.
    pub fn process_body(&self, body: &str) -> Page {
        let text = strip(body);
        let display_list = layout(&text, self.viewport_width, self.hstep, self.vstep);
        log::debug!(
            "laid out {} glyphs at width {}",
            display_list.len(),
            self.viewport_width
        );
        Page {
            headers: BTreeMap::new(),
            text,
            display_list,
        }
    }
}
