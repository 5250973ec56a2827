use std::io;
use std::io::ErrorKind;

use chrono::{Datelike, Utc};
use ramhorns::Template;

#[derive(ramhorns::Content)]
struct StaticPage<'a> {
    head: &'a str,
    site_name: &'a str,
    year: i32,
}

/// Pages whose only dynamic part is the document head: the home page and
/// the not-found page.
pub struct PageRenderer<'a> {
    pub template: Template<'a>,
}

impl PageRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<PageRenderer> {
        let template = match Template::new(tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing page template: {}", e)));
            }
        };

        Ok(PageRenderer {
            template,
        })
    }

    pub fn render(&self, head: &str, site_name: &str) -> String {
        self.template.render(&StaticPage {
            head,
            site_name,
            year: Utc::now().year(),
        })
    }
}
