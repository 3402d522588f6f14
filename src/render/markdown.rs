//! Markdown renderer.
//!
//! `//` comments are prose: each line becomes a markdown line ending in
//! `<br>`, and an empty `//` line becomes a paragraph break. `/* */`
//! comments are usage examples and are emitted as fenced `golang` blocks.

use super::Title;
use crate::model::*;
use crate::toc;

/// Link appended after every rendered section.
const BACK_TO_TOP: &str = "[go top](#index)\n\n";

/// Render a comment group into a markdown fragment.
pub fn render_comment_group(group: &CommentGroup) -> String {
    let mut output = String::new();

    for comment in &group.list {
        let raw = comment.text.replace('\r', "");
        match comment.kind {
            CommentKind::Line => {
                let text = trim_space(raw.strip_prefix("//").unwrap_or(&raw));
                output.push_str(text);
                // A blank `//` right after a `<br>` line closes the paragraph;
                // a fence marker must stay alone on its line.
                if output.ends_with("<br>\n") || text.ends_with("```") {
                    output.push('\n');
                } else {
                    output.push_str("<br>\n");
                }
            }
            CommentKind::Block => {
                let Some(inner) = raw.strip_prefix("/*").and_then(|t| t.strip_suffix("*/")) else {
                    continue;
                };
                output.push_str("\n```golang\n");
                output.push_str(trim_space(inner));
                output.push_str("\n```\n");
            }
        }
    }

    output
}

/// Render the complete document for a scanned file.
pub fn render_file(file: &SourceFile, title: &Title) -> String {
    let mut head = format!("# {}\n", title.resolve(&file.package_name));

    match &file.leading_comment {
        Some(group) => head.push_str(&render_comment_group(group)),
        None => head.push('\n'),
    }

    let mut types: Vec<String> = Vec::new();
    let mut funcs: Vec<String> = Vec::new();
    let mut body = String::new();

    for decl in &file.declarations {
        match decl {
            Declaration::Type(ty) => {
                let Some(doc) = documented(ty.doc.as_ref()) else {
                    tracing::debug!("skipping undocumented type {}", ty.name);
                    continue;
                };
                let title = format!("[type] {}", ty.name);
                body.push_str(&format!("# {}\n\n", title));
                body.push_str("```golang\n");
                body.push_str(file.slice(ty.span));
                body.push_str("\n```\n");
                body.push_str(&render_comment_group(doc));
                types.push(title);
            }
            Declaration::Function(func) => {
                let Some(doc) = documented(func.doc.as_ref()) else {
                    tracing::debug!("skipping undocumented func {}", func.name);
                    continue;
                };
                let signature = func.signature.map_or("", |span| file.slice(span));
                let title = format!("[func] {}", func.name);
                body.push_str(&format!("# {}\n>{}\n\n", title, signature));
                body.push_str(&render_comment_group(doc));
                funcs.push(title);
            }
            Declaration::Other(other) => {
                tracing::info!(
                    keyword = %other.keyword,
                    "pass: {}",
                    file.slice(other.span).lines().next().unwrap_or_default()
                );
                continue;
            }
        }
        body.push_str(BACK_TO_TOP);
    }

    head.push_str(&render_index(&types, &funcs));

    format!("{}\n\n{}", head, body)
}

/// `# Index` block with the TYPE and FUNC lists; empty when both are empty.
fn render_index(types: &[String], funcs: &[String]) -> String {
    let mut output = String::new();

    if !types.is_empty() || !funcs.is_empty() {
        output.push_str("# Index\n");
    }
    if !types.is_empty() {
        output.push_str("TYPE: \n");
        for title in types {
            output.push_str(&toc::render_toc_item(title));
            output.push('\n');
        }
    }
    if !funcs.is_empty() {
        output.push_str("\nFUNC:\n");
        for title in funcs {
            output.push_str(&toc::render_toc_item(title));
            output.push('\n');
        }
    }

    output
}

fn documented(doc: Option<&CommentGroup>) -> Option<&CommentGroup> {
    doc.filter(|d| !d.is_empty())
}

/// Trim surrounding newlines, then at most one leading space.
fn trim_space(text: &str) -> &str {
    let text = text.trim_matches('\n');
    text.strip_prefix(' ').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> Comment {
        Comment {
            kind: CommentKind::Line,
            text: text.to_string(),
            span: Span::default(),
        }
    }

    fn block(text: &str) -> Comment {
        Comment {
            kind: CommentKind::Block,
            text: text.to_string(),
            span: Span::default(),
        }
    }

    fn group(list: Vec<Comment>) -> CommentGroup {
        CommentGroup { list }
    }

    fn render_source(src: &str, title: &str) -> String {
        let file = crate::parser::go::parse(src).unwrap();
        render_file(&file, &Title::from_flag(title))
    }

    #[test]
    fn empty_group() {
        assert_eq!(render_comment_group(&CommentGroup::default()), "");
    }

    #[test]
    fn line_comment_gets_break() {
        assert_eq!(render_comment_group(&group(vec![line("// hello")])), "hello<br>\n");
    }

    #[test]
    fn only_one_leading_space_is_stripped() {
        assert_eq!(
            render_comment_group(&group(vec![line("//  indented")])),
            " indented<br>\n"
        );
        assert_eq!(
            render_comment_group(&group(vec![line("//tight")])),
            "tight<br>\n"
        );
    }

    #[test]
    fn fence_marker_gets_bare_newline() {
        let g = group(vec![line("// ```"), line("// -f string"), line("// ```")]);
        assert_eq!(render_comment_group(&g), "```\n-f string<br>\n```\n");
    }

    #[test]
    fn empty_line_after_prose_is_paragraph_break() {
        let g = group(vec![line("// first"), line("//"), line("// second")]);
        assert_eq!(render_comment_group(&g), "first<br>\n\nsecond<br>\n");
    }

    #[test]
    fn carriage_returns_are_dropped() {
        assert_eq!(render_comment_group(&group(vec![line("// crlf\r")])), "crlf<br>\n");
    }

    #[test]
    fn block_comment_is_golang_fence() {
        let g = group(vec![block("/* foo() */")]);
        let expected = "\n```golang\nfoo() \n```\n";
        assert_eq!(render_comment_group(&g), expected);

        let g = group(vec![block("/*foo()*/")]);
        assert_eq!(render_comment_group(&g), "\n```golang\nfoo()\n```\n");
        assert_eq!(render_comment_group(&g), render_comment_group(&g));
    }

    #[test]
    fn multiline_block_comment_trims_newlines() {
        let g = group(vec![block("/*\n$ go install example.com/tool\n*/")]);
        assert_eq!(
            render_comment_group(&g),
            "\n```golang\n$ go install example.com/tool\n```\n"
        );
    }

    #[test]
    fn mixed_group_keeps_order() {
        let g = group(vec![
            line("// eg."),
            block("/*\nExample(\"world\")\n*/"),
            line("// done"),
        ]);
        assert_eq!(
            render_comment_group(&g),
            "eg.<br>\n\n```golang\nExample(\"world\")\n```\ndone<br>\n"
        );
    }

    #[test]
    fn empty_file_has_no_index() {
        let out = render_source("package main\n", ".");
        assert_eq!(out, "# main\n\n\n\n");
        assert!(!out.contains("# Index"));
    }

    #[test]
    fn literal_title_and_leading_comment() {
        let out = render_source("// Hello\npackage demo\n", "Docs");
        assert_eq!(out, "# Docs\nHello<br>\n\n\n");
    }

    #[test]
    fn leading_comment_found_past_bom_and_blank_lines() {
        for src in ["\u{feff}// Lead\npackage main\n", "\n\n// Lead\npackage main\n"] {
            let out = render_source(src, ".");
            assert!(out.starts_with("# main\nLead<br>\n"), "got: {:?}", out);
        }
    }

    #[test]
    fn comment_after_package_never_becomes_header() {
        let out = render_source("package main\n// loose\n\n/* doc */\ntype T int\n", ".");
        assert!(out.starts_with("# main\n\n# Index\n"), "got: {:?}", out);
        assert!(!out.contains("loose"));
        assert!(out.contains("```golang\ntype T int\n```\n\n```golang\ndoc \n```\n"));
    }

    #[test]
    fn documented_function_end_to_end() {
        let src = "package main\n\n// does a thing\nfunc Example(name string) error {\n\treturn nil\n}\n";
        let out = render_source(src, ".");
        assert_eq!(
            out,
            "# main\n\n# Index\n\nFUNC:\n- [[func] Example](#[func]-Example)\n\n\n\
             # [func] Example\n>(name string) error\n\ndoes a thing<br>\n[go top](#index)\n\n"
        );
    }

    #[test]
    fn documented_type_is_fenced() {
        let src = "package shapes\n\n// Point is a point.\ntype Point struct {\n\tX, Y int\n}\n";
        let out = render_source(src, ".");
        assert!(out.contains("TYPE: \n- [[type] Point](#[type]-Point)\n"));
        assert!(out.contains(
            "# [type] Point\n\n```golang\ntype Point struct {\n\tX, Y int\n}\n```\nPoint is a point.<br>\n[go top](#index)\n\n"
        ));
        assert!(!out.contains("FUNC:"));
    }

    #[test]
    fn undocumented_declarations_are_invisible() {
        let src = "package main\n\nimport \"fmt\"\n\ntype hidden int\n\nfunc helper() {}\n\n// Shown is documented.\nfunc Shown() {}\n";
        let out = render_source(src, ".");
        assert!(!out.contains("hidden"));
        assert!(!out.contains("helper"));
        assert!(!out.contains("TYPE:"));
        assert_eq!(out.matches("[go top](#index)").count(), 1);
        assert!(out.contains("# [func] Shown\n>()\n\nShown is documented.<br>\n"));
    }

    #[test]
    fn index_lists_types_then_funcs_in_source_order() {
        let src = "package main\n\n// B doc\nfunc B() {}\n\n// Z doc\ntype Z int\n\n// A doc\nfunc A() {}\n\n// Y doc\ntype Y int\n";
        let out = render_source(src, ".");
        let index = "# Index\nTYPE: \n- [[type] Z](#[type]-Z)\n- [[type] Y](#[type]-Y)\n\nFUNC:\n- [[func] B](#[func]-B)\n- [[func] A](#[func]-A)\n";
        assert!(out.contains(index), "unexpected index in:\n{}", out);

        let b = out.find("# [func] B").unwrap();
        let z = out.find("# [type] Z").unwrap();
        let a = out.find("# [func] A").unwrap();
        let y = out.find("# [type] Y").unwrap();
        assert!(b < z && z < a && a < y);
    }

    #[test]
    fn missing_signature_renders_empty() {
        let file = SourceFile {
            package_name: "main".to_string(),
            declarations: vec![Declaration::Function(FuncDecl {
                name: "F".to_string(),
                signature: None,
                doc: Some(group(vec![line("// doc")])),
            })],
            ..Default::default()
        };
        let out = render_file(&file, &Title::PackageName);
        assert!(out.contains("# [func] F\n>\n\ndoc<br>\n"));
    }
}
