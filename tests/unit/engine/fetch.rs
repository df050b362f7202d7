use super::*;

fn temp_root(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("layerfx_fetch_{tag}_{}", std::process::id()));
    std::fs::create_dir_all(dir.join("assets")).unwrap();
    dir
}

#[tokio::test]
async fn relative_sources_resolve_against_root() {
    let root = temp_root("rel");
    std::fs::write(root.join("assets").join("a.png"), b"png").unwrap();

    let fetcher = FsFetcher::new(&root);
    assert_eq!(fetcher.root(), root.as_path());
    assert_eq!(fetcher.fetch("assets/a.png").await.unwrap(), b"png");
    std::fs::remove_dir_all(root).ok();
}

#[tokio::test]
async fn absolute_sources_are_read_as_given() {
    let root = temp_root("abs");
    let outside = root.join("clip.mp4");
    std::fs::write(&outside, b"mp4").unwrap();

    let fetcher = FsFetcher::new(root.join("assets"));
    let abs = outside.to_string_lossy().to_string();
    assert_eq!(fetcher.fetch(&abs).await.unwrap(), b"mp4");
    std::fs::remove_dir_all(root).ok();
}

#[tokio::test]
async fn missing_source_is_an_asset_error() {
    let root = temp_root("missing");
    let fetcher = FsFetcher::new(&root);
    let err = fetcher.fetch("nope.png").await.unwrap_err();
    assert!(matches!(err, LayerfxError::AssetResolution(ref m) if m.contains("nope.png")));
    std::fs::remove_dir_all(root).ok();
}
