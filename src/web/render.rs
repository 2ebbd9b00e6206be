// src/web/render.rs
// =============================================================================
// Renders a named page template from a context of variables.
//
// Contract: render(name, context) where context maps variable names to JSON
// values. Only the templates listed in `render` exist; asking for anything
// else, or leaving out a variable a template uses, is an error.
//
// Every value that ends up in the page is HTML-escaped.
// =============================================================================

use serde_json::{Map, Value};
use thiserror::Error;

pub const INDEX_TEMPLATE: &str = "cyberapp/index.html";

pub type Context = Map<String, Value>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("template '{0}' does not exist")]
    UnknownTemplate(String),

    #[error("template '{template}' needs variable '{variable}'")]
    MissingVariable { template: String, variable: String },

    #[error("template '{template}': variable '{variable}' has the wrong shape")]
    BadVariable { template: String, variable: String },
}

pub fn render(template: &str, context: &Context) -> Result<String, RenderError> {
    match template {
        INDEX_TEMPLATE => render_index(context),
        other => Err(RenderError::UnknownTemplate(other.to_string())),
    }
}

fn render_index(context: &Context) -> Result<String, RenderError> {
    let variable = "latest_question_list";
    let bad = || RenderError::BadVariable {
        template: INDEX_TEMPLATE.to_string(),
        variable: variable.to_string(),
    };

    let questions = context
        .get(variable)
        .ok_or_else(|| RenderError::MissingVariable {
            template: INDEX_TEMPLATE.to_string(),
            variable: variable.to_string(),
        })?
        .as_array()
        .ok_or_else(bad)?;

    let mut body = String::new();
    if questions.is_empty() {
        body.push_str("<p>No polls are available.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for question in questions {
            let id = question.get("id").and_then(Value::as_u64).ok_or_else(bad)?;
            let text = question
                .get("question_text")
                .and_then(Value::as_str)
                .ok_or_else(bad)?;
            body.push_str(&format!(
                "  <li><a href=\"/{}/\">{}</a></li>\n",
                id,
                escape_html(text)
            ));
        }
        body.push_str("</ul>\n");
    }

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Latest questions</title></head>\n\
         <body>\n{}</body>\n</html>\n",
        body
    ))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: Value) -> Context {
        let mut ctx = Context::new();
        ctx.insert("latest_question_list".to_string(), value);
        ctx
    }

    #[test]
    fn test_renders_question_links() {
        let html = render(
            INDEX_TEMPLATE,
            &context(json!([
                { "id": 2, "question_text": "What's new?" },
                { "id": 1, "question_text": "Tabs or spaces?" }
            ])),
        )
        .unwrap();

        assert!(html.contains("<li><a href=\"/2/\">What&#x27;s new?</a></li>"));
        assert!(html.contains("<li><a href=\"/1/\">Tabs or spaces?</a></li>"));
        assert!(html.find("/2/").unwrap() < html.find("/1/").unwrap());
    }

    #[test]
    fn test_empty_list_message() {
        let html = render(INDEX_TEMPLATE, &context(json!([]))).unwrap();
        assert!(html.contains("No polls are available."));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn test_escapes_markup() {
        let html = render(
            INDEX_TEMPLATE,
            &context(json!([{ "id": 1, "question_text": "<script>alert(1)</script> & co" }])),
        )
        .unwrap();
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; co"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_missing_variable_and_unknown_template() {
        assert_eq!(
            render(INDEX_TEMPLATE, &Context::new()),
            Err(RenderError::MissingVariable {
                template: INDEX_TEMPLATE.to_string(),
                variable: "latest_question_list".to_string(),
            })
        );
        assert_eq!(
            render("cyberapp/detail.html", &Context::new()),
            Err(RenderError::UnknownTemplate("cyberapp/detail.html".to_string()))
        );
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let result = render(INDEX_TEMPLATE, &context(json!("not a list")));
        assert!(matches!(result, Err(RenderError::BadVariable { .. })));
    }
}
