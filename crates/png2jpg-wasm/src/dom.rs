//! Delivering results through the host page's DOM.
//!
//! The page provides two elements:
//! - `<a id="output-file">`, used as the download link
//! - `<span id="err-msg-spn">`, which receives failure messages

use log::error;
use png2jpg_core::{data_uri, ArchiveSink, ARCHIVE_MIME_TYPE};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Element id of the download link.
pub const OUTPUT_LINK_ID: &str = "output-file";

/// Element id of the error message span.
pub const ERROR_MESSAGE_ID: &str = "err-msg-spn";

/// [`ArchiveSink`] backed by elements of the current document.
#[derive(Debug, Clone, Copy)]
pub struct DomSink {
    link_id: &'static str,
    error_id: &'static str,
}

impl Default for DomSink {
    fn default() -> Self {
        Self {
            link_id: OUTPUT_LINK_ID,
            error_id: ERROR_MESSAGE_ID,
        }
    }
}

fn element(id: &str) -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

impl ArchiveSink for DomSink {
    fn deliver_archive(&self, bytes: &[u8], suggested_name: &str) {
        let Some(link) = element(self.link_id) else {
            error!("download link #{} not found", self.link_id);
            return;
        };

        let href = data_uri(ARCHIVE_MIME_TYPE, bytes);
        let attrs = link
            .set_attribute("href", &href)
            .and_then(|_| link.set_attribute("download", suggested_name));
        if let Err(e) = attrs {
            error!("failed to prepare download link: {:?}", e);
            return;
        }

        match link.dyn_ref::<HtmlElement>() {
            Some(link) => link.click(),
            None => error!("#{} is not an HTML element", self.link_id),
        }
    }

    fn report_failure(&self, message: &str) {
        match element(self.error_id)
            .as_ref()
            .and_then(|el| el.dyn_ref::<HtmlElement>())
        {
            Some(span) => span.set_inner_text(message),
            None => error!("error message element #{} not found: {}", self.error_id, message),
        }
    }
}
