use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::PostSummary;
use crate::text_utils::excerpt;

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">
<channel>
  <title>Ada Writes</title>
  <link>https://ada.example.com</link>
  <description>Portfolio and blog</description>
  <item>
    <title>Hello World</title>
    <link>https://ada.example.com/blogs/hello-world</link>
    <guid isPermaLink="false">p1</guid>
    <description><![CDATA[Hello from the first post....]]></description>
    <pubDate>Sat, 1 Jun 2024 10:00:00 +0000</pubDate>
  </item>
</channel>
</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl RssChannel<'_> {
    pub fn render(&self, posts: &[PostSummary]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;
        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;

        for post in posts {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", post.title.as_str())?;

            let link = full_link(self.ch_link, post.slug.current.as_str());
            push_text(&mut writer, "link", link.as_str())?;

            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "false"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(post.id.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_cdata(&mut writer, "description", &excerpt(&post.body))?;

            if let Some(ref published_at) = post.published_at {
                push_text(&mut writer, "pubDate", &published_at.to_rfc2822())?;
            }

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn full_link(base_url: &str, slug: &str) -> String {
    format!("{}/blogs/{}", base_url.trim_end_matches('/'), slug)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use crate::test_data::POST_LIST;

    use super::*;

    #[test]
    fn render_xml() {
        let posts: Vec<PostSummary> = serde_json::from_str(POST_LIST).unwrap();

        let rss = RssChannel {
            ch_title: "Ada Writes",
            ch_link: "https://ada.example.com/",
            ch_desc: "Portfolio & blog",
        };
        let xml = rss.render(&posts[..2]).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    #[test]
    fn render_post_without_date() {
        let mut posts: Vec<PostSummary> = serde_json::from_str(POST_LIST).unwrap();
        posts[6].published_at = None;

        let rss = RssChannel {
            ch_title: "t",
            ch_link: "https://ada.example.com",
            ch_desc: "d",
        };
        let xml = rss.render(&posts[6..]).unwrap();
        let xml = str::from_utf8(&xml).unwrap();
        assert!(xml.contains("<link>https://ada.example.com/blogs/untitled-notes</link>"));
        assert!(xml.contains("<![CDATA[Read more...]]>"));
        assert!(!xml.contains("pubDate"));
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Ada Writes</title><link>https://ada.example.com/</link><description>Portfolio &amp; blog</description><item><title>Hello World</title><link>https://ada.example.com/blogs/hello-world</link><guid isPermaLink="false">p1</guid><description><![CDATA[Hello from the first post....]]></description><pubDate>Sat, 1 Jun 2024 10:00:00 +0000</pubDate></item><item><title>CSS Grids in Practice</title><link>https://ada.example.com/blogs/css-grids</link><guid isPermaLink="false">p2</guid><description><![CDATA[Grids are great....]]></description><pubDate>Mon, 20 May 2024 08:30:00 +0000</pubDate></item></channel></rss>"##;
}
