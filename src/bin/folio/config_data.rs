use std::fs::File;
use std::io;
use std::io::Write;
use std::path::PathBuf;

const CONFIG_SAMPLE: &str = r#"[site]
name = "My Portfolio"
url = "https://example.com"
author = "Jane Doe"
job_title = "Frontend developer"
default_title = "Jane Doe | Frontend developer"
default_description = "Portfolio and blog of Jane Doe"
default_keywords = "frontend, web, blog"
default_og_image = "https://example.com/public/profile.jpg"
same_as = []

[sanity]
project_id = "your-project-id"
dataset = "production"
api_version = "2023-05-03"
use_cdn = true
# token = "read token for private datasets"
timeout_secs = 10

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
template_dir = "res/template"
public_dir = "res/public"

# Posts shown before the first "load more" and how many each click reveals
[defaults]
initial_visible = 4
load_more_step = 3
rss_page_size = 20

[server]
address = "0.0.0.0"
port = 8001

# Remove this section to log to stdout only
[log]
level = "Info"
log_to_console = true
# Daily files kept, 0 keeps everything
max_files = 60
"#;

pub(crate) fn write_sample_cfg(file_path: &PathBuf) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}

#[cfg(test)]
mod tests {
    use folio::config::parse_config;

    use super::*;

    #[test]
    fn test_sample_is_valid() {
        let config = parse_config(CONFIG_SAMPLE).unwrap();
        assert_eq!(config.server.port, 8001);
        assert_eq!(config.defaults.initial_visible(), 4);
        assert_eq!(config.log.unwrap().max_files, Some(60));
    }
}
