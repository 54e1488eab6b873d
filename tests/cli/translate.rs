use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::CliTest;

const SOURCE_CATALOG: &str = r#"{
  "home.text_1": "Welcome",
  "home.plural_1": "{count, plural, one {1 item} other {N items}}"
}
"#;

#[test]
fn test_translate_pseudo_fills_missing_keys() -> Result<()> {
    let test = CliTest::with_file("translations/en.json", SOURCE_CATALOG)?;
    test.write_file("translations/fr.json", r#"{ "home.text_1": "Bienvenue" }"#)?;

    let run = test.run(&["translate", "--lang", "fr", "--pseudo"])?;

    assert_eq!(run.code(), Some(0), "stderr: {}", run.stderr());
    assert!(run.stdout().contains("fr: translated 1 key"));
    assert_eq!(
        test.read_json("translations/fr.json")?,
        json!({
            "home.text_1": "Bienvenue",
            "home.plural_1": "[FR] {count, plural, one {1 item} other {N items}}"
        })
    );

    Ok(())
}

#[test]
fn test_translate_defaults_to_existing_catalogs() -> Result<()> {
    let test = CliTest::with_file("translations/en.json", SOURCE_CATALOG)?;
    test.write_file("translations/de.json", "{}")?;

    let run = test.run(&["translate", "--pseudo"])?;

    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("de: translated 2 keys"));
    assert_eq!(
        test.read_json("translations/de.json")?["home.text_1"],
        json!("[DE] Welcome")
    );

    Ok(())
}

#[test]
fn test_translate_dry_run_counts_only() -> Result<()> {
    let test = CliTest::with_file("translations/en.json", SOURCE_CATALOG)?;

    let run = test.run(&["translate", "--lang", "fr,ja", "--dry-run"])?;

    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("fr: 2 keys to translate"));
    assert!(run.stdout().contains("ja: 2 keys to translate"));
    assert!(!test.root().join("translations/fr.json").exists());

    Ok(())
}

#[test]
fn test_translate_up_to_date_locale() -> Result<()> {
    let test = CliTest::with_file("translations/en.json", r#"{ "a.text_1": "Hi" }"#)?;
    test.write_file("translations/fr.json", r#"{ "a.text_1": "Salut" }"#)?;

    let run = test.run(&["translate", "--lang", "fr", "--pseudo"])?;

    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("fr: up to date"));
    assert_eq!(test.read_json("translations/fr.json")?, json!({ "a.text_1": "Salut" }));

    Ok(())
}

#[test]
fn test_translate_without_credentials_fails() -> Result<()> {
    let test = CliTest::with_file("translations/en.json", SOURCE_CATALOG)?;

    let run = test.run(&["translate", "--lang", "fr"])?;

    assert_eq!(run.code(), Some(1));
    assert!(run.stdout().contains("no credentials found"));
    assert!(!test.root().join("translations/fr.json").exists());

    Ok(())
}

#[test]
fn test_translate_without_source_catalog_fails() -> Result<()> {
    let test = CliTest::new()?;

    let run = test.run(&["translate", "--lang", "fr", "--pseudo"])?;

    assert_eq!(run.code(), Some(1));
    assert!(run.stdout().contains("source catalog not found"));

    Ok(())
}

#[test]
fn test_translate_registers_locale_in_entry() -> Result<()> {
    let test = CliTest::with_file("translations/en.json", SOURCE_CATALOG)?;
    test.write_file(
        "app/_layout.tsx",
        "export default function Layout() {\n  return null;\n}\n",
    )?;

    let run = test.run(&["translate", "--lang", "fr", "--pseudo"])?;

    assert_eq!(run.code(), Some(0));
    let entry = test.read_file("app/_layout.tsx")?;
    assert!(entry.contains(r#"import fr from "../translations/fr.json";"#));
    assert!(entry.contains(r#"initLocalisation("en", { en, fr });"#));

    Ok(())
}
