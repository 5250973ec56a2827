/// Builds the CDN URL of an image asset from its reference id,
/// e.g. `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg`.
pub fn image_url(asset_ref: &str, project_id: &str, dataset: &str) -> Option<String> {
    let rest = asset_ref.strip_prefix("image-")?;
    let (rest, ext) = rest.rsplit_once('-')?;
    let (id, dimensions) = rest.rsplit_once('-')?;

    let (width, height) = dimensions.split_once('x')?;
    if id.is_empty() || ext.is_empty() || width.parse::<u32>().is_err() || height.parse::<u32>().is_err() {
        return None;
    }

    Some(format!("https://cdn.sanity.io/images/{}/{}/{}-{}.{}", project_id, dataset, id, dimensions, ext))
}
