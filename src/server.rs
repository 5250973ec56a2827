use std::io;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{error, info};

use crate::config::Config;
use crate::content::client::{fetch_as, SanityClient};
use crate::content::query::Query;
use crate::content::rich_text::{RichTextRenderer, SiteComponents};
use crate::content::{Post, PostSummary};
use crate::controller::detail::{DetailController, DetailState};
use crate::controller::listing::ListingController;
use crate::controller::scope::ViewScope;
use crate::query_string::QueryString;
use crate::view::list_renderer::ListRenderer;
use crate::view::page_renderer::PageRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::RssChannel;
use crate::view::seo::SeoOptions;

struct AppState {
    client: SanityClient,
    config: Config,
}

fn html_response(rendered: io::Result<String>) -> web::HttpResponse {
    match rendered {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            error!("Error rendering page: {}", e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering page: {}", e))
        }
    }
}

fn not_found_response(config: &Config) -> web::HttpResponse {
    match render_not_found(config) {
        Ok(body) => web::HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            error!("Error rendering not found page: {}", e);
            web::HttpResponse::NotFound().finish()
        }
    }
}

pub fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    std::fs::read_to_string(&full_path)
        .map_err(|e| io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e)))
}

pub fn render_index(config: &Config) -> io::Result<String> {
    let template_src = read_template(&config.paths.template_dir, "index.tpl")?;
    let renderer = PageRenderer::new(&template_src)?;
    let head = SeoOptions::default().render(&config.site);
    Ok(renderer.render(&head, &config.site.name))
}

pub fn render_not_found(config: &Config) -> io::Result<String> {
    let template_src = read_template(&config.paths.template_dir, "notfound.tpl")?;
    let renderer = PageRenderer::new(&template_src)?;
    let head = SeoOptions {
        title: Some(format!("Post not found | {}", config.site.name)),
        ..Default::default()
    }.render(&config.site);
    Ok(renderer.render(&head, &config.site.name))
}

pub fn render_listing(config: &Config, listing: &ListingController) -> io::Result<String> {
    let template_src = read_template(&config.paths.template_dir, "bloglist.tpl")?;
    let renderer = ListRenderer::new(&template_src)?;
    let head = SeoOptions::for_listing(&config.site).render(&config.site);
    Ok(renderer.render(listing, &head))
}

pub fn render_post(config: &Config, post: &Post, slug: &str) -> io::Result<String> {
    let template_src = read_template(&config.paths.template_dir, "blog.tpl")?;
    let renderer = PostRenderer::new(&template_src)?;
    let body = RichTextRenderer::new(SiteComponents {
        project_id: config.sanity.project_id.clone(),
        dataset: config.sanity.dataset.clone(),
    });
    let head = SeoOptions::for_post(&config.site, post, slug).render(&config.site);
    Ok(renderer.render(post, &body, &head))
}

pub fn render_rss(config: &Config, posts: &[PostSummary]) -> io::Result<Vec<u8>> {
    let page_size = config.defaults.rss_page_size() as usize;
    let posts = &posts[..posts.len().min(page_size)];

    let channel = RssChannel {
        ch_title: &config.site.name,
        ch_link: &config.site.url,
        ch_desc: &config.site.default_description,
    };
    channel.render(posts).map_err(|e| io::Error::new(ErrorKind::Other, e.to_string()))
}

#[web::get("/")]
async fn index(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    html_response(render_index(&state.config))
}

#[web::get("/blogs")]
async fn blogs(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let defaults = &state.config.defaults;
    // A client that disconnects drops this future, and the fetch with it.
    // The scope only closes once the response is built.
    let scope = ViewScope::new();
    let mut listing = ListingController::new(defaults.initial_visible(), defaults.load_more_step());
    listing.load(&state.client, &scope.guard()).await;

    let qs = QueryString::from(req.uri().query().unwrap_or_default());
    listing.select_category(qs.get_category());
    for _ in 0..qs.get_more() {
        listing.load_more();
    }

    html_response(render_listing(&state.config, &listing))
}

// Begin: Redirect region --------
#[web::get("/blogs/")]
async fn blogs_with_slash() -> web::HttpResponse {
    web::HttpResponse::PermanentRedirect()
        .header("Location", "/blogs")
        .finish()
}

#[web::get("/blogs/{slug}/")]
async fn blog_with_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::PermanentRedirect()
        .header("Location", format!("/blogs/{}", path.into_inner()))
        .finish()
}
// End: Redirect region --------

#[web::get("/blogs/{slug}")]
async fn blog(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let slug = path.into_inner();
    // Same lifetime as the request future, see `blogs`
    let scope = ViewScope::new();
    let mut detail = DetailController::new(&slug);
    detail.load(&state.client, &scope.guard()).await;

    match detail.into_state() {
        DetailState::Found(post) => html_response(render_post(&state.config, &post, &slug)),
        DetailState::NotFound | DetailState::Loading => not_found_response(&state.config),
    }
}

#[web::get("/rss")]
async fn rss(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let posts = match fetch_as::<_, Vec<PostSummary>>(&state.client, &Query::list_posts()).await {
        Ok(posts) => posts,
        Err(e) => {
            error!("Error fetching posts for the feed: {}", e);
            vec![]
        }
    };

    match render_rss(&state.config, &posts) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(xml),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering feed: {}", e)),
    }
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    if path.contains("..") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

async fn not_found(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    not_found_response(&state.config)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let client = SanityClient::new(&config.sanity)
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, format!("Error creating content client: {}", e)))?;

    info!("Reading content from project {} dataset {}", config.sanity.project_id, config.sanity.dataset);

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        client,
        config,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(public_files)
            .service(rss)
            .service(blogs)
            .service(blogs_with_slash)
            .service(blog)
            .service(blog_with_slash)
            .default_service(web::route().to(not_found))
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::config::{Defaults, Paths, Sanity, Server};
    use crate::content::client::ContentSource;
    use crate::test_data::{test_site, StaticSource, CATEGORY_LIST, POST_DETAIL, POST_LIST};

    use super::*;

    fn config() -> Config {
        Config {
            site: test_site(),
            sanity: Sanity {
                project_id: "abc123".to_string(),
                dataset: "production".to_string(),
                api_version: None,
                use_cdn: true,
                token: None,
                timeout_secs: None,
            },
            paths: Paths {
                template_dir: PathBuf::from("res/template"),
                public_dir: PathBuf::from("res/public"),
            },
            defaults: Defaults {
                initial_visible: None,
                load_more_step: None,
                rss_page_size: Some(3),
            },
            server: Server {
                address: "127.0.0.1".to_string(),
                port: 8001,
            },
            log: None,
        }
    }

    #[test]
    fn test_render_static_pages() {
        let config = config();
        let home = render_index(&config).unwrap();
        assert!(home.contains("<title>Ada | Frontend developer</title>"));
        assert!(home.contains("href=\"/blogs\""));

        let not_found = render_not_found(&config).unwrap();
        assert!(not_found.contains("Post not found"));
    }

    #[test]
    fn test_missing_template() {
        let mut config = config();
        config.paths.template_dir = PathBuf::from("res/no-such-dir");
        let err = render_index(&config).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("index.tpl"));
    }

    #[tokio::test]
    async fn test_render_listing_page() {
        let config = config();
        let source = StaticSource::new()
            .with(Query::list_posts(), POST_LIST)
            .with(Query::list_categories(), CATEGORY_LIST);
        let scope = ViewScope::new();
        let mut listing = ListingController::new(4, 3);
        listing.load(&source, &scope.guard()).await;

        let html = render_listing(&config, &listing).unwrap();
        assert!(html.contains("/blogs/hello-world"));
        assert!(html.contains("/blogs/design-systems"));
        assert!(!html.contains("/blogs/ownership"));
        assert!(html.contains("/blogs?more=1"));

        listing.load_more();
        let html = render_listing(&config, &listing).unwrap();
        assert!(html.contains("/blogs/untitled-notes"));
        assert!(!html.contains("/blogs?more=2"));
    }

    #[test]
    fn test_render_post_page() {
        let config = config();
        let post: Post = serde_json::from_str(POST_DETAIL).unwrap();
        let html = render_post(&config, &post, "hello-world").unwrap();
        assert!(html.contains("<title>Hello World | Blog - Ada</title>"));
        assert!(html.contains("June 1, 2024"));
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains(r#"<h1 class="text-3xl font-bold mb-6 text-white">Hello World</h1>"#));
        assert!(html.contains("BlogPosting"));
    }

    #[tokio::test]
    async fn test_render_rss_is_capped() {
        let config = config();
        let source = StaticSource::new().with(Query::list_posts(), POST_LIST);
        let value = source.fetch(&Query::list_posts()).await.unwrap();
        let posts: Vec<PostSummary> = serde_json::from_value(value).unwrap();

        let xml = render_rss(&config, &posts).unwrap();
        let xml = String::from_utf8(xml).unwrap();
        assert_eq!(xml.matches("<item>").count(), 3);
        assert!(xml.contains("<link>https://ada.example.com/blogs/async-rust</link>"));

        let xml = render_rss(&config, &[]).unwrap();
        assert!(!String::from_utf8(xml).unwrap().contains("<item>"));
    }
}
