//! End-to-end pipeline tests over an on-disk locales directory.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use googletest::prelude::*;
use paywall_screen::config::PageSettings;
use paywall_screen::store::DirSource;
use paywall_screen::{
    Page,
    stock_document,
};
use tempfile::TempDir;
use url::Url;

fn write_locales(dir: &Path) {
    fs::write(
        dir.join("en.json"),
        r#"{
            "Unlock Premium Access": "Unlock Premium Access",
            "Continue": "Continue",
            "Just {{price}} per year": "Just {{price}} per year",
            "{{price}} <br>per week": "{{price}} <br>per week"
        }"#,
    )
    .unwrap();
    fs::write(
        dir.join("es.json"),
        r#"{
            "Unlock Premium Access": "Desbloquea el acceso Premium",
            "Continue": "Continuar",
            "Just {{price}} per year": "Solo {{price}} al año",
            "{{price}} <br>per week": "{{price}} <br>por semana"
        }"#,
    )
    .unwrap();
}

fn page_for(dir: &Path) -> Page<DirSource> {
    let settings =
        PageSettings { locales_dir: dir.to_path_buf(), ..PageSettings::default() };
    let source = DirSource::from_settings(&settings).unwrap();
    Page::new(settings, source)
}

#[tokio::test]
async fn localizes_page_from_lang_parameter() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());
    let mut page = page_for(temp_dir.path());
    let mut doc = stock_document();
    let mut address = Url::parse("https://example.com/paywall?lang=es").unwrap();

    page.initialize(&mut doc, &mut address, None).await.unwrap();

    let html = doc.to_html();
    assert_that!(html, contains_substring("Desbloquea el acceso Premium"));
    assert_that!(html, contains_substring("Solo $39.99 al año"));
    assert_that!(html, contains_substring("$0.48 <br>por semana"));
    assert_that!(html, contains_substring("$6.99 <br>por semana"));
    assert_that!(html, contains_substring(r#"lang="es""#));
}

#[tokio::test]
async fn falls_back_to_default_table_for_missing_locale_file() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());
    let mut page = page_for(temp_dir.path());
    let mut doc = stock_document();
    // "fr" is supported but has no file on disk in this fixture.
    let mut address = Url::parse("https://example.com/paywall?lang=fr").unwrap();

    page.initialize(&mut doc, &mut address, None).await.unwrap();

    let html = doc.to_html();
    assert_that!(html, contains_substring("Unlock Premium Access"));
    assert_that!(html, contains_substring("Just $39.99 per year"));
    // The address keeps the requested locale; only the table fell back.
    assert_that!(address.query(), some(eq("lang=fr")));
}

#[tokio::test]
async fn client_language_drives_resolution_and_url_rewrite() {
    let temp_dir = TempDir::new().unwrap();
    write_locales(temp_dir.path());
    let mut page = page_for(temp_dir.path());
    let mut doc = stock_document();
    let mut address = Url::parse("https://example.com/paywall").unwrap();

    page.initialize(&mut doc, &mut address, Some("es-MX")).await.unwrap();

    assert_that!(address.query(), some(eq("lang=es")));
    assert_that!(doc.to_html(), contains_substring("Continuar"));
}

#[tokio::test]
async fn empty_locales_dir_fails_but_marks_initialized() {
    let temp_dir = TempDir::new().unwrap();
    let mut page = page_for(temp_dir.path());
    let mut doc = stock_document();
    let mut address = Url::parse("https://example.com/paywall").unwrap();

    let result = page.initialize(&mut doc, &mut address, None).await;

    assert_that!(result, err(anything()));
    assert_that!(page.is_initialized(), eq(true));
    // Untranslated, unpriced, but structurally intact.
    assert_that!(doc.to_html(), contains_substring("continue-button"));
}

#[tokio::test]
async fn shipped_locale_assets_parse_and_render() {
    let locales = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/locales");
    let mut page = page_for(&locales);
    let mut doc = stock_document();
    let mut address = Url::parse("https://example.com/paywall?lang=de").unwrap();

    page.initialize(&mut doc, &mut address, None).await.unwrap();

    let html = doc.to_html();
    assert_that!(html, contains_substring("Premium-Zugang freischalten"));
    assert_that!(html, contains_substring("Nur $39.99 pro Jahr"));
    assert_that!(html, contains_substring("Weiter"));
}
