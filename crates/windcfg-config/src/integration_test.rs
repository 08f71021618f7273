use std::fs;
use tempfile::tempdir;

use super::*;

#[test]
fn test_full_config_workflow() {
    let dir = tempdir().unwrap();
    let config_content = r#"/** @type {import('tailwindcss').Config} */
module.exports = {
  darkMode: 'media',
  content: [
    './templates/**/*.html',
    './**/templates/**/*.html',
    './static/js/**/*.js',
  ],
  theme: {
    screens: { tablet: '640px', laptop: '1024px' },
    extend: {
      colors: {
        tracker: { light: '#e0f2fe', DEFAULT: '#0284c7', dark: '#075985' },
      },
    },
  },
  plugins: [require('@tailwindcss/forms')],
  prefix: 'tw-',
}
"#;
    fs::write(dir.path().join("tailwind.config.js"), config_content).unwrap();

    let loader = ConfigLoader::new(dir.path());
    let config = loader.load().unwrap();

    assert_eq!(config.dark_mode(), DarkModeStrategy::Media);
    assert_eq!(config.content().len(), 3);
    assert_eq!(config.theme().overrides["screens"]["laptop"], "1024px");
    let extend = config.theme().extend.as_ref().unwrap();
    assert_eq!(extend["colors"]["tracker"]["DEFAULT"], "#0284c7");
    assert_eq!(
        config.plugins(),
        &[PluginRef::Module("@tailwindcss/forms".to_string())]
    );
    assert_eq!(config.extra()["prefix"], "tw-");

    // Export to JSON next to it and make sure the JSON copy is equivalent.
    let json_path = loader.save(&config, SourceFormat::Json).unwrap();
    let from_json = load(&json_path).unwrap();
    assert_eq!(from_json, config);
    assert_eq!(from_json.to_external_format(), config.to_external_format());

    // The JavaScript file still wins discovery.
    assert!(loader.discover().unwrap().ends_with("tailwind.config.js"));

    // Overwrite the JavaScript file with the rendered form and reload.
    loader.save(&config, SourceFormat::JavaScript).unwrap();
    let reloaded = loader.load().unwrap();
    assert_eq!(reloaded, config);
    let written = fs::read_to_string(dir.path().join("tailwind.config.js")).unwrap();
    assert!(written.starts_with(JS_TYPE_HEADER));
    assert!(written.contains("require('@tailwindcss/forms')"));
}
