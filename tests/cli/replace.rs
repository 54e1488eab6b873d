use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::CliTest;

const HOME: &str = r#"export function Home({ count }) {
  return (
    <View>
      <Text>Welcome back</Text>
      <Text>{count === 1 ? "1 item" : "N items"}</Text>
      <Image source="logo.png" />
    </View>
  );
}
"#;

#[test]
fn test_replace_rewrites_sources_and_writes_catalog() -> Result<()> {
    let test = CliTest::with_file("src/screens/Home.tsx", HOME)?;

    let run = test.run(&["replace"])?;
    assert_eq!(run.code(), Some(0), "stderr: {}", run.stderr());
    assert!(run.stdout().contains("Replaced 2 strings in 1 file (2 keys added):"));
    assert!(run.stdout().contains("  - src/screens/Home.tsx"));

    assert_snapshot!(test.read_file("src/screens/Home.tsx")?, @r#"
    import { t } from "localise-ai-sdk";
    export function Home({ count }) {
      return (
        <View>
          <Text>{t("screens.home.text_1")}</Text>
          <Text>{t("screens.home.plural_1", { count: count })}</Text>
          <Image source="logo.png" />
        </View>
      );
    }
    "#);
    assert_eq!(
        test.read_json("translations/en.json")?,
        json!({
            "screens.home.text_1": "Welcome back",
            "screens.home.plural_1": "{count, plural, one {1 item} other {N items}}"
        })
    );

    Ok(())
}

#[test]
fn test_replace_twice_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("src/screens/Home.tsx", HOME)?;

    test.run(&["replace"])?;
    let source = test.read_file("src/screens/Home.tsx")?;
    let catalog = test.read_file("translations/en.json")?;

    let run = test.run(&["replace"])?;
    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("nothing to replace"));
    assert_eq!(test.read_file("src/screens/Home.tsx")?, source);
    assert_eq!(test.read_file("translations/en.json")?, catalog);

    Ok(())
}

#[test]
fn test_replace_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("src/screens/Home.tsx", HOME)?;

    let run = test.run(&["replace", "--dry-run"])?;

    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("Would replace 2 strings"));
    assert_eq!(test.read_file("src/screens/Home.tsx")?, HOME);
    assert!(!test.root().join("translations/en.json").exists());

    Ok(())
}

#[test]
fn test_replace_reuses_keys_across_files() -> Result<()> {
    let test = CliTest::with_file("src/A.tsx", "export const A = () => <b>Save</b>;\n")?;
    test.write_file("src/B.tsx", "export const B = () => <i>Save</i>;\n")?;

    test.run(&["replace"])?;

    assert!(test.read_file("src/B.tsx")?.contains(r#"<i>{t("a.text_1")}</i>"#));
    assert_eq!(test.read_json("translations/en.json")?, json!({ "a.text_1": "Save" }));

    Ok(())
}

#[test]
fn test_replace_skips_unparsable_files() -> Result<()> {
    let test = CliTest::with_file("src/Broken.tsx", "export const = <div>;\n")?;
    test.write_file("src/Ok.tsx", "export const Ok = () => <p>Fine</p>;\n")?;

    let run = test.run(&["replace"])?;

    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("1 file could not be parsed"));
    assert_eq!(test.read_file("src/Broken.tsx")?, "export const = <div>;\n");
    assert!(test.read_file("src/Ok.tsx")?.contains(r#"t("ok.text_1")"#));

    Ok(())
}

#[test]
fn test_replace_injects_entry_file() -> Result<()> {
    let test = CliTest::with_file("src/Home.tsx", "export const Home = () => <p>Hello</p>;\n")?;
    test.write_file("App.tsx", "export default function App() {\n  return null;\n}\n")?;

    let run = test.run(&["replace"])?;

    assert_eq!(run.code(), Some(0));
    assert_eq!(
        test.read_file("App.tsx")?,
        r#"import { initLocalisation } from "localise-ai-sdk";
import en from "./translations/en.json";

initLocalisation("en", { en });

export default function App() {
  return null;
}
"#
    );

    Ok(())
}

#[test]
fn test_replace_respects_ignore_file() -> Result<()> {
    let test = CliTest::with_file("src/legacy/Old.tsx", "export const Old = () => <p>Old</p>;\n")?;
    test.write_file(".localiseignore", "# generated\nsrc/legacy/\n")?;

    let run = test.run(&["replace"])?;

    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("nothing to replace"));
    assert!(!test.read_file("src/legacy/Old.tsx")?.contains("t("));

    Ok(())
}
