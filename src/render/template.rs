//! Fixed page shell around rendered fragments.

use std::borrow::Cow;

use super::html::escape_html;

const STYLE_RULES: &[&str] = &[
    r#"body { font-family: "Noto Sans KR", sans-serif; line-height: 1.6; padding: 20px; max-width: 900px; margin: 0 auto; }"#,
    "h1 { color: #1e3a8a; border-bottom: 3px solid #1e3a8a; padding-bottom: 10px; }",
    "h2 { color: #2563eb; margin-top: 30px; }",
    "table { width: 100%; border-collapse: collapse; margin: 20px 0; }",
    "th, td { border: 1px solid #d1d5db; padding: 12px; text-align: left; }",
    "th { background-color: #f3f4f6; font-weight: bold; color: #1e3a8a; }",
    "tr:nth-child(even) { background-color: #f9fafb; }",
    "p { margin: 10px 0; }",
    "strong { color: #1e40af; }",
];

/// Page header lines, up to and including `<body>`.
pub(crate) fn header(lang: &str, title: Option<&str>) -> Vec<Cow<'static, str>> {
    let mut lines: Vec<Cow<'static, str>> = vec![
        "<!DOCTYPE html>".into(),
        format!(r#"<html lang="{}">"#, escape_html(lang)).into(),
        "<head>".into(),
        r#"    <meta charset="UTF-8">"#.into(),
        r#"    <meta name="viewport" content="width=device-width, initial-scale=1.0">"#.into(),
    ];
    if let Some(title) = title {
        lines.push(format!("    <title>{}</title>", escape_html(title)).into());
    }
    lines.push("    <style>".into());
    lines.extend(STYLE_RULES.iter().map(|rule| format!("        {}", rule).into()));
    lines.push("    </style>".into());
    lines.push("</head>".into());
    lines.push("<body>".into());
    lines
}

/// Page footer lines.
pub(crate) fn footer() -> [&'static str; 2] {
    ["</body>", "</html>"]
}

/// Join header, fragments and footer into the final page.
///
/// Lines are separated by `\n` with no trailing newline.
pub(crate) fn wrap<'a>(
    lang: &str,
    title: Option<&str>,
    fragments: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut lines: Vec<Cow<'_, str>> = header(lang, title);
    lines.extend(fragments.into_iter().map(Cow::Borrowed));
    lines.extend(footer().into_iter().map(Cow::Borrowed));
    lines.join("\n")
}
