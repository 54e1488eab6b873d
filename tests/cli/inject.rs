use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

const LAYOUT: &str = r#"import { Stack } from "expo-router";

export default function Layout() {
  return <Stack />;
}
"#;

#[test]
fn test_inject_registers_every_catalog() -> Result<()> {
    let test = CliTest::with_file("app/_layout.tsx", LAYOUT)?;
    test.write_file("translations/en.json", "{}")?;
    test.write_file("translations/fr.json", "{}")?;

    let run = test.run(&["inject"])?;

    assert_eq!(run.code(), Some(0), "stderr: {}", run.stderr());
    assert_eq!(
        test.read_file("app/_layout.tsx")?,
        r#"import { initLocalisation } from "localise-ai-sdk";
import { Stack } from "expo-router";
import en from "../translations/en.json";
import fr from "../translations/fr.json";

initLocalisation("en", { en, fr });

export default function Layout() {
  return <Stack />;
}
"#
    );

    Ok(())
}

#[test]
fn test_inject_twice_is_unchanged() -> Result<()> {
    let test = CliTest::with_file("app/_layout.tsx", LAYOUT)?;
    test.write_file("translations/en.json", "{}")?;

    test.run(&["inject", "--lang", "de"])?;
    let first = test.read_file("app/_layout.tsx")?;
    let run = test.run(&["inject", "--lang", "de"])?;

    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("already registers every locale"));
    assert_eq!(test.read_file("app/_layout.tsx")?, first);

    Ok(())
}

#[test]
fn test_inject_dry_run() -> Result<()> {
    let test = CliTest::with_file("app/_layout.tsx", LAYOUT)?;

    let run = test.run(&["inject", "--dry-run"])?;

    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("Would update"));
    assert_eq!(test.read_file("app/_layout.tsx")?, LAYOUT);

    Ok(())
}

#[test]
fn test_inject_without_entry_file() -> Result<()> {
    let test = CliTest::new()?;

    let run = test.run(&["inject"])?;

    assert_eq!(run.code(), Some(1));
    assert!(run.stdout().contains("No entry file found"));

    Ok(())
}
