use super::*;

#[test]
fn every_section_maps_to_its_fragment() {
    for section in SECTIONS {
        assert_eq!(fragment_path(section.name), Some(format!("/sections/{}.html", section.name)));
    }
}

#[test]
fn fragment_url_appends_cache_buster() {
    assert_eq!(fragment_url("network", 1_700_000_000_123).as_deref(), Some("/sections/network.html?t=1700000000123"));
}

#[test]
fn unmapped_sections_render_error_block() {
    for name in ["", "reports", "../secret", "Dashboard"] {
        let (content, url) = begin_load(name, 1);
        assert_eq!(url, None);
        assert_eq!(content, SectionContent::NotFound { name: name.to_owned() });
        assert!(content.html().contains("Section not found."));
        assert!(content.initializers().is_empty());
    }
}

#[test]
fn begin_load_hides_region_until_fragment_arrives() {
    let (content, url) = begin_load("system", 42);
    assert_eq!(url.as_deref(), Some("/sections/system.html?t=42"));
    assert!(!content.is_visible());
    assert_eq!(content.html(), "");
}

#[test]
fn failed_fetch_renders_static_error() {
    let content = finish_load("system", Err("status 404".to_owned()));
    assert!(content.is_visible());
    assert!(content.html().contains("Failed to load section content."));
    assert!(content.initializers().is_empty());
}

#[test]
fn loaded_fragment_keeps_markup_and_initializers() {
    let content = finish_load("security", Ok("<div>sec</div>".to_owned()));
    assert_eq!(content.html(), "<div>sec</div>");
    assert_eq!(content.initializers(), &[SectionInit::SecurityTabs, SectionInit::Parallax]);
    assert_eq!(content.name(), "security");
}

#[test]
fn initializer_registry() {
    assert_eq!(initializers("dashboard"), &[SectionInit::Dashboard]);
    assert_eq!(initializers("network"), &[SectionInit::NetworkDevices, SectionInit::Parallax]);
    assert_eq!(initializers("kubernetes"), &[SectionInit::Kubernetes]);
    assert_eq!(initializers("system"), &[SectionInit::Health, SectionInit::Parallax]);
    assert_eq!(initializers("inventory"), &[SectionInit::Parallax]);
    assert!(initializers("topologies").is_empty());
    assert!(initializers("gpus").is_empty());
}

#[test]
fn default_section_is_routable() {
    assert!(fragment_path(DEFAULT_SECTION).is_some());
}

#[test]
fn error_block_markup() {
    assert_eq!(
        error_block("boom"),
        r#"<div class="section-container"><h2 class="section-title">Error</h2><div class="section-content">boom</div></div>"#
    );
}
