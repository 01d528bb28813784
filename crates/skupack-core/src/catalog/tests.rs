use super::*;

fn files(c: &Catalog) -> Vec<(&str, &str)> {
    c.files
        .iter()
        .map(|f| (f.source_url.as_str(), f.target_filename.as_str()))
        .collect()
}

#[test]
fn drive_share_line_becomes_one_catalog() {
    let catalogs = parse("katalog/produk-1\thttps://drive.google.com/file/d/ABC123/view");
    assert_eq!(catalogs.len(), 1);
    assert_eq!(catalogs[0].folder_path, "katalog/produk-1");
    assert_eq!(catalogs[0].name, "produk-1");
    assert_eq!(
        files(&catalogs[0]),
        vec![("https://drive.google.com/uc?id=ABC123", "image-1.png")]
    );
}

#[test]
fn header_rows_produce_nothing() {
    let text = "SKU\tLink\n\
                Nama Produk\tPackshot Depan\n\
                ETALASE utama\thttps://cdn.example.com/a.png\n\
                sku\thttps://cdn.example.com/b.png\n";
    assert!(parse(text).is_empty());
}

#[test]
fn sku_must_match_whole_column() {
    let catalogs = parse("SKU-001\thttps://cdn.example.com/a.jpg");
    assert_eq!(catalogs.len(), 1);
    assert_eq!(catalogs[0].folder_path, "SKU-001");
}

#[test]
fn synthesized_names_count_per_folder() {
    let text = "a\thttps://cdn.example.com/x\n\
                a\thttps://cdn.example.com/y\n\
                b\thttps://cdn.example.com/z\n\
                a\thttps://cdn.example.com/w\n";
    let catalogs = parse(text);
    let a: Vec<_> = catalogs[0].files.iter().map(|f| f.target_filename.as_str()).collect();
    assert_eq!(a, vec!["image-1.png", "image-2.png", "image-3.png"]);
    assert_eq!(catalogs[1].files[0].target_filename, "image-1.png");
}

#[test]
fn extension_is_taken_from_url_path() {
    let text = "a\thttps://cdn.example.com/p/photo.JPEG?w=800\n\
                a\thttps://cdn.example.com/p/anim.gif\n\
                a\thttps://cdn.example.com/p/doc.pdf\n";
    let catalogs = parse(text);
    let names: Vec<_> = catalogs[0].files.iter().map(|f| f.target_filename.as_str()).collect();
    assert_eq!(names, vec!["image-1.jpeg", "image-2.gif", "image-3.png"]);
}

#[test]
fn explicit_filename_in_path_hint() {
    let catalogs = parse("katalog/katalog-produk-2/final/image-1.png\thttps://cdn.domain.com/path/to/file.png");
    assert_eq!(catalogs[0].folder_path, "katalog/katalog-produk-2/final");
    assert_eq!(catalogs[0].files[0].target_filename, "image-1.png");
    assert_eq!(catalogs[0].files[0].source_url, "https://cdn.domain.com/path/to/file.png");
}

#[test]
fn bare_filename_hint_lands_in_default_root() {
    let catalogs = parse("cover.webp\thttps://cdn.example.com/c");
    assert_eq!(catalogs[0].folder_path, "katalog");
    assert_eq!(catalogs[0].files[0].target_filename, "cover.webp");
}

#[test]
fn parenthetical_name_is_used_when_no_explicit_name() {
    let catalogs = parse("baju/merah\thttps://drive.google.com/file/d/F1/view\t(Tampak Depan)");
    assert_eq!(catalogs[0].folder_path, "baju/merah");
    assert_eq!(catalogs[0].files[0].target_filename, "Tampak Depan");
}

#[test]
fn explicit_name_beats_parenthetical() {
    let catalogs = parse("baju/depan.jpg\thttps://cdn.example.com/x.jpg\t(ignored)");
    assert_eq!(catalogs[0].files[0].target_filename, "depan.jpg");
}

#[test]
fn nested_parentheses_are_not_a_name() {
    let catalogs = parse("a\thttps://cdn.example.com/x\t(outer (inner))");
    assert_eq!(catalogs[0].files[0].target_filename, "image-1.png");
    let catalogs = parse("a\thttps://cdn.example.com/x\t(open");
    assert_eq!(catalogs[0].files[0].target_filename, "image-1.png");
}

#[test]
fn folder_marker_applies_to_following_bare_urls() {
    let text = "katalog/sepatu\n\
                https://cdn.example.com/1.png\n\
                \thttps://cdn.example.com/2.png\t\n\
                katalog/tas\n\
                https://cdn.example.com/3.png\n";
    let catalogs = parse(text);
    assert_eq!(catalogs.len(), 2);
    assert_eq!(catalogs[0].folder_path, "katalog/sepatu");
    assert_eq!(catalogs[0].files.len(), 2);
    assert_eq!(catalogs[1].folder_path, "katalog/tas");
    assert_eq!(catalogs[1].files[0].target_filename, "image-1.png");
}

#[test]
fn url_line_updates_remembered_folder() {
    let text = "a/b\thttps://cdn.example.com/1.png\n\
                https://cdn.example.com/2.png\n";
    let catalogs = parse(text);
    assert_eq!(catalogs.len(), 1);
    assert_eq!(catalogs[0].files.len(), 2);
}

#[test]
fn bare_url_without_context_uses_default_root() {
    let catalogs = parse_with_root("https://cdn.example.com/a.png", "hasil");
    assert_eq!(catalogs[0].folder_path, "hasil");
    assert_eq!(catalogs[0].name, "hasil");
}

#[test]
fn url_embedded_in_free_text_is_found() {
    let catalogs = parse("produk/kaos lihat https://cdn.example.com/k.png");
    assert_eq!(catalogs[0].folder_path, "produk/kaos lihat");
    assert_eq!(catalogs[0].files[0].source_url, "https://cdn.example.com/k.png");
    assert_eq!(catalogs[0].files[0].target_filename, "image-1.png");
}

#[test]
fn traversal_in_path_hint_is_neutralized() {
    let catalogs = parse("../../etc/x:y\thttps://cdn.example.com/a.png");
    assert_eq!(catalogs[0].folder_path, "etc/xy");
}

#[test]
fn mixed_newlines_and_blank_lines() {
    let text = "a\thttps://cdn.example.com/1.png\r\n\r\n  \rb\thttps://cdn.example.com/2.png\r";
    let catalogs = parse(text);
    assert_eq!(catalogs.len(), 2);
}

#[test]
fn folder_links_are_kept_verbatim() {
    let url = "https://drive.google.com/drive/folders/1AbC?usp=drive_link";
    let catalogs = parse(&format!("a\t{url}"));
    assert_eq!(catalogs[0].files[0].source_url, url);
}

#[test]
fn render_then_parse_is_identity() {
    let text = "SKU\tPackshot\n\
                katalog/sepatu\n\
                https://drive.google.com/file/d/AAA/view\n\
                https://drive.google.com/open?id=BBB\t(Samping Kiri)\n\
                katalog/tas/depan.jpg\thttps://cdn.example.com/t.jpg\n\
                katalog/tas\thttps://cdn.example.com/u\n\
                https://drive.google.com/drive/folders/FFF\n";
    let first = parse(text);
    let second = parse(&render(&first));
    assert_eq!(first, second);
    assert_eq!(CatalogSummary::of(&first), CatalogSummary { folders: 2, files: 5 });
}
