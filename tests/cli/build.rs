use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

fn localized_project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "templates/index.html",
        r#"<h1>{{ translate("title") }}</h1>{{ render("footer.html") }}"#,
    )?;
    test.write_file(
        "templates/partials/footer.html",
        r#"<footer>{{ translate("footer.copy") }} {{ year }}</footer>"#,
    )?;
    test.write_file(
        "messages/en.json",
        r#"{"title": "Hello", "footer": {"copy": "All rights reserved."}}"#,
    )?;
    test.write_file(
        "messages/fr.json",
        r#"{"title": "Bonjour", "footer": {"copy": "Tous droits réservés."}}"#,
    )?;
    Ok(test)
}

#[test]
fn test_build_one_file_per_locale() -> Result<()> {
    let test = localized_project()?;

    let output = test
        .build_command()
        .args(["templates/index.html", "-o", "dist/%.html"])
        .args(["--messages-root", "messages"])
        .args(["--partials-root", "templates/partials"])
        .args(["--set", "year=2024"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} File `dist/en.html` created.\n\
         \u{2713} File `dist/fr.html` created.\n\
         \u{2713} Rendered 2 files for 2 locales\n"
    );
    assert_snapshot!(
        test.read_file("dist/en.html")?,
        @"<h1>Hello</h1><footer>All rights reserved. 2024</footer>"
    );
    assert_eq!(
        test.read_file("dist/fr.html")?,
        "<h1>Bonjour</h1><footer>Tous droits réservés. 2024</footer>"
    );

    Ok(())
}

#[test]
fn test_build_without_messages_uses_default_locale() -> Result<()> {
    let test = CliTest::with_file("page.txt", "Hi {{ name }}\n")?;

    let output = test
        .build_command()
        .args(["page.txt", "--dest", "out/%.txt", "--set", "name=Ada"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("out/default.txt")?, "Hi Ada\n");

    Ok(())
}

#[test]
fn test_build_concatenates_glob_sources() -> Result<()> {
    let test = CliTest::with_file("parts/1-head.txt", "head")?;
    test.write_file("parts/2-body.txt", "body")?;

    let output = test
        .build_command()
        .args(["parts/*.txt", "-o", "out/%.txt"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("out/default.txt")?, "head\nbody");

    Ok(())
}

#[test]
fn test_build_missing_translation_key_writes_nothing() -> Result<()> {
    let test = localized_project()?;
    test.write_file("messages/de.json", r#"{"title": "Hallo"}"#)?;

    let output = test
        .build_command()
        .args(["templates/index.html", "-o", "dist/%.html"])
        .args(["--messages-root", "messages"])
        .args(["--partials-root", "templates/partials"])
        .args(["--set", "year=2024"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("No translation found for key: footer.copy"),
        "stderr: {}",
        stderr(&output)
    );
    assert!(!test.root().join("dist").exists());

    Ok(())
}

#[test]
fn test_build_missing_source_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .build_command()
        .args(["missing.html", "-o", "out/%.html"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stderr(&output),
        "Error: Source file `missing.html` not found.\n"
    );
    assert!(!test.root().join("out").exists());

    Ok(())
}

#[test]
fn test_build_dry_run_writes_nothing() -> Result<()> {
    let test = localized_project()?;

    let output = test
        .build_command()
        .args(["templates/index.html", "-o", "dist/%.html", "--dry-run"])
        .args(["--messages-root", "messages"])
        .args(["--partials-root", "templates/partials"])
        .args(["--set", "year=2024"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "  would write dist/en.html (en)\n  would write dist/fr.html (fr)\n\
         dry-run: 2 locales rendered from 1 source file, nothing written\n"
    );
    assert!(!test.root().join("dist").exists());

    Ok(())
}

#[test]
fn test_build_from_config_file() -> Result<()> {
    let test = localized_project()?;
    test.write_file(
        "templates/partials/footer.html",
        "<footer>{{ translate(\"footer.copy\") }} {{ year }}</footer>\n\n",
    )?;
    test.write_file(
        ".glotrenderrc.json",
        r#"{
  "sources": ["templates/index.html"],
  "dest": "public/%/index.html",
  "messagesRoot": "./messages",
  "partialsRoot": "./templates/partials/",
  "trimPartials": true,
  "data": { "year": { "$env": "RELEASE_YEAR" } }
}"#,
    )?;

    let output = test
        .build_command()
        .env("RELEASE_YEAR", "2025")
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("public/en/index.html")?,
        "<h1>Hello</h1><footer>All rights reserved. 2025</footer>"
    );
    assert_eq!(
        test.read_file("public/fr/index.html")?,
        "<h1>Bonjour</h1><footer>Tous droits réservés. 2025</footer>"
    );

    Ok(())
}

#[test]
fn test_build_reports_unset_env_option() -> Result<()> {
    let test = CliTest::with_file("index.html", "{{ year }}")?;
    test.write_file(
        ".glotrenderrc.json",
        r#"{ "sources": ["index.html"], "data": { "year": { "$env": "RELEASE_YEAR" } } }"#,
    )?;

    let output = test.build_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("Failed to evaluate option `year`"),
        "stderr: {}",
        stderr(&output)
    );

    Ok(())
}
