use crate::config::{
    ConfigOptsIcons, ConfigOptsPwa, DEFAULT_VIEWPORT, IconSource, MetaValue, PublicUrl, RtcPwa,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn empty_config_resolves_to_defaults() {
    let cfg = RtcPwa::from_opts(ConfigOptsPwa::default());

    assert_eq!(cfg.title, None);
    assert_eq!(cfg.manifest.name, None);
    assert_eq!(cfg.manifest.orientation.as_deref(), Some("portrait"));
    assert_eq!(cfg.manifest.display.as_deref(), Some("standalone"));
    assert_eq!(cfg.manifest.background_color.as_deref(), Some("#fff"));
    assert_eq!(cfg.manifest.theme_color, None);
    assert_eq!(cfg.manifest.start_url, None);
    assert_eq!(cfg.manifest.filename, "manifest.json");
    assert_eq!(cfg.icons.source, None);
    assert_eq!(cfg.icons.output_path, "icons/");
    assert!(!cfg.icons.optimize);

    let meta: Vec<_> = cfg.meta.enabled().map(|(key, _)| key).collect();
    assert_eq!(meta, ["charset", "appleMobileWebAppCapable", "viewport"]);
    assert_eq!(
        cfg.meta.get("viewport"),
        Some(&MetaValue::from(DEFAULT_VIEWPORT))
    );
}

#[test]
fn shared_values_propagate() {
    let cfg = ConfigOptsPwa::from_toml_str(
        r##"
title = "My App"
themeColor = "#123456"
"##,
    )
    .expect("must parse");
    let cfg = RtcPwa::from_opts(cfg);

    assert_eq!(cfg.title.as_deref(), Some("My App"));
    assert_eq!(cfg.manifest.name.as_deref(), Some("My App"));
    assert_eq!(cfg.manifest.theme_color.as_deref(), Some("#123456"));
    assert_eq!(cfg.meta.get("themeColor"), Some(&MetaValue::from("#123456")));
}

#[test]
fn explicit_values_win() {
    let cfg = ConfigOptsPwa::from_toml_str(
        r##"
title = "My App"
themeColor = "#123456"

[manifest]
name = "Explicit"
shortName = "Ex"
themeColor = "#000000"
display = "fullscreen"

[meta]
themeColor = "#ffffff"
charset = false
"##,
    )
    .expect("must parse");
    let cfg = RtcPwa::from_opts(cfg);

    assert_eq!(cfg.manifest.name.as_deref(), Some("Explicit"));
    assert_eq!(cfg.manifest.short_name.as_deref(), Some("Ex"));
    assert_eq!(cfg.manifest.theme_color.as_deref(), Some("#000000"));
    assert_eq!(cfg.manifest.display.as_deref(), Some("fullscreen"));
    assert_eq!(cfg.meta.get("themeColor"), Some(&MetaValue::from("#ffffff")));

    // charset stays in its default position, but is disabled
    assert_eq!(cfg.meta.0[0], ("charset".into(), Some(MetaValue::Flag(false))));
    assert!(cfg.meta.enabled().all(|(key, _)| key != "charset"));
}

#[test]
fn additional_meta_entries_are_appended() {
    let cfg = ConfigOptsPwa::from_toml_str(
        r#"
[meta]
viewport = "width=device-width"
mobileWebAppCapable = true
description = "A test app"
"#,
    )
    .expect("must parse");
    let cfg = RtcPwa::from_opts(cfg);

    let keys: Vec<_> = cfg.meta.0.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(
        keys,
        [
            "charset",
            "themeColor",
            "appleMobileWebAppCapable",
            "viewport",
            "description",
            "mobileWebAppCapable"
        ]
    );
    assert_eq!(
        cfg.meta.get("viewport"),
        Some(&MetaValue::from("width=device-width"))
    );
    assert_eq!(
        cfg.meta.get("mobileWebAppCapable"),
        Some(&MetaValue::Flag(true))
    );
}

#[test]
fn icons_shorthand() {
    let cfg = ConfigOptsPwa::from_toml_str(r#"icons = "assets/logo.png""#).expect("must parse");
    assert_eq!(
        cfg.icons,
        Some(ConfigOptsIcons::Source(IconSource::from("assets/logo.png")))
    );

    let cfg = RtcPwa::from_opts(cfg);
    assert_eq!(cfg.icons.source, Some(IconSource::from("assets/logo.png")));
    assert_eq!(cfg.icons.output_path, "icons/");
}

#[test]
fn icons_details() {
    let cfg = ConfigOptsPwa::from_toml_str(
        r#"
[icons]
source = "assets/logo.png"
outputPath = "static/icons/"
optimize = true
"#,
    )
    .expect("must parse");
    let cfg = RtcPwa::from_opts(cfg);

    assert_eq!(cfg.icons.source, Some(IconSource::from("assets/logo.png")));
    assert_eq!(cfg.icons.output_path, "static/icons/");
    assert!(cfg.icons.optimize);
    assert_eq!(
        cfg.icons.asset_name("favicon-16x16.png"),
        "static/icons/favicon-16x16.png"
    );
}

#[test]
fn unknown_fields_are_ignored() {
    let cfg = ConfigOptsPwa::from_toml_str(
        r#"
title = "App"
something = "else"

[other]
value = 1
"#,
    )
    .expect("must parse");

    assert_eq!(cfg.title.as_deref(), Some("App"));
}

#[test]
fn extra_manifest_members_are_kept() {
    let cfg = ConfigOptsPwa::from_toml_str(
        r#"
[manifest]
short_name = "App"
description = "An app"
scope = "/app/"
"#,
    )
    .expect("must parse");
    let cfg = RtcPwa::from_opts(cfg);

    assert_eq!(cfg.manifest.short_name.as_deref(), Some("App"));
    assert_eq!(
        cfg.manifest.extra.get("description"),
        Some(&serde_json::Value::from("An app"))
    );
    assert_eq!(
        cfg.manifest.extra.get("scope"),
        Some(&serde_json::Value::from("/app/"))
    );
    assert!(!cfg.manifest.extra.contains_key("short_name"));
}

#[test]
fn parse_json() {
    let cfg: ConfigOptsPwa = serde_json::from_str(
        r##"{
  "title": "App",
  "themeColor": "#abcdef",
  "icons": { "source": "logo.png", "outputPath": "img/" },
  "meta": { "appleMobileWebAppCapable": false }
}"##,
    )
    .expect("must parse");
    let cfg = RtcPwa::from_opts(cfg);

    assert_eq!(cfg.icons.output_path, "img/");
    assert_eq!(
        cfg.meta.get("appleMobileWebAppCapable"),
        Some(&MetaValue::Flag(false))
    );
}

#[test]
fn public_url_from_config() {
    #[derive(serde::Deserialize)]
    struct Build {
        public_url: PublicUrl,
    }

    let build: Build = toml::from_str(r#"public_url = "/app/""#).expect("must parse");
    assert_eq!(build.public_url, PublicUrl::AbsolutePath("/app/".into()));
}

#[tokio::test]
async fn load_rebases_icon_source() {
    let dir = tempdir().expect("error creating temp dir");
    let file = dir.path().join("Pwa.toml");
    fs::write(&file, r#"icons = "logo.png""#).expect("error writing config");

    let cfg = ConfigOptsPwa::load(&file).await.expect("must load");
    let cfg = RtcPwa::from_opts(cfg);

    assert_eq!(
        cfg.icons.source,
        Some(IconSource::Path(dir.path().join("logo.png")))
    );
}

#[tokio::test]
async fn load_keeps_absolute_icon_source() {
    let dir = tempdir().expect("error creating temp dir");
    let file = dir.path().join("pwa.json");
    fs::write(&file, r#"{ "icons": { "source": "/srv/logo.png" } }"#)
        .expect("error writing config");

    let cfg = RtcPwa::from_opts(ConfigOptsPwa::load(&file).await.expect("must load"));

    assert_eq!(cfg.icons.source, Some(IconSource::from("/srv/logo.png")));
}

#[tokio::test]
async fn load_rejects_unknown_format() {
    let dir = tempdir().expect("error creating temp dir");
    let file = dir.path().join("pwa.ini");
    fs::write(&file, "title = App").expect("error writing config");

    let err = ConfigOptsPwa::load(&file)
        .await
        .expect_err("must not load");
    assert_eq!(err.to_string(), "Unsupported configuration file type: ini");
}

#[test]
fn meta_spellings_replace_defaults() {
    let cfg = ConfigOptsPwa::from_toml_str(
        r##"
themeColor = "#111111"

[meta]
"apple-mobile-web-app-capable" = false
theme_color = "#ffffff"
"##,
    )
    .expect("must parse");
    let cfg = RtcPwa::from_opts(cfg);

    let keys: Vec<_> = cfg.meta.0.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(
        keys,
        ["charset", "themeColor", "appleMobileWebAppCapable", "viewport"]
    );
    assert_eq!(cfg.meta.get("themeColor"), Some(&MetaValue::from("#ffffff")));
    assert_eq!(
        cfg.meta.get("appleMobileWebAppCapable"),
        Some(&MetaValue::Flag(false))
    );
    assert!(
        cfg.meta
            .enabled()
            .all(|(key, _)| key != "appleMobileWebAppCapable")
    );
}

#[test]
fn exact_meta_spelling_wins() {
    let cfg = ConfigOptsPwa::from_toml_str(
        r##"
[meta]
viewport = "width=500"
VIEWPORT = "width=600"
"##,
    )
    .expect("must parse");
    let cfg = RtcPwa::from_opts(cfg);

    assert_eq!(cfg.meta.0.len(), 4);
    assert_eq!(cfg.meta.get("viewport"), Some(&MetaValue::from("width=500")));
}

#[test]
fn empty_strings_are_unset() {
    let cfg = ConfigOptsPwa::from_toml_str(
        r#"
title = ""

[manifest]
startUrl = ""
"#,
    )
    .expect("must parse");
    let cfg = RtcPwa::from_opts(cfg);

    assert_eq!(cfg.title, None);
    assert_eq!(cfg.manifest.name, None);
    assert_eq!(cfg.manifest.start_url, None);
}
