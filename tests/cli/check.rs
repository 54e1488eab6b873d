use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::with_file(
        "src/App.tsx",
        "import { t } from \"localise-ai-sdk\";\nexport const App = () => <p>{t(\"app.text_1\")}</p>;\n",
    )?;
    test.write_file("translations/en.json", r#"{ "app.text_1": "Hello" }"#)?;

    let run = test.run(&["check"])?;

    assert_eq!(run.code(), Some(0));
    assert_eq!(
        run.stdout(),
        "\u{2713} Checked 1 file against 1 key - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_check_reports_unknown_key() -> Result<()> {
    let source = "import { t } from \"localise-ai-sdk\";\nexport const App = () => <p>{t(\"app.text_7\")}</p>;\n";
    let test = CliTest::with_file("src/App.tsx", source)?;
    test.write_file("translations/en.json", "{}")?;

    let run = test.run(&["check"])?;

    assert_eq!(run.code(), Some(1));
    assert!(run.stdout().contains("Key \"app.text_7\" is not in the source catalog  unknown-key"));
    assert!(run.stdout().contains("--> src/App.tsx:2"));
    assert_eq!(test.read_file("src/App.tsx")?, source);
    assert!(!test.root().join("translations/fr.json").exists());

    Ok(())
}

#[test]
fn test_check_reports_parse_errors() -> Result<()> {
    let test = CliTest::with_file("src/Broken.tsx", "export const = ;\n")?;

    let run = test.run(&["check"])?;

    assert_eq!(run.code(), Some(1));
    assert!(run.stdout().contains("parse-error"));
    assert!(run.stdout().contains("--> src/Broken.tsx"));

    Ok(())
}

#[test]
fn test_check_notes_pending_text() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "export const App = () => <p>Hello</p>;\n")?;

    let run = test.run(&["check"])?;

    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("1 string is still hardcoded"));

    Ok(())
}
