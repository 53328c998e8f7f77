use tracing::info;

use crate::cli::TranslateArgs;
use crate::client::{AppContext, CliResult};
use crate::commands::desk_failure;
use crate::output::render_translation;

pub(crate) async fn handle_translate(ctx: &AppContext, args: TranslateArgs) -> CliResult<()> {
    let desk = ctx.desk();
    desk.set_source(args.source);
    desk.set_target(args.target);
    desk.set_text(args.joined_text());

    let record = desk
        .translate()
        .await
        .map_err(|err| desk_failure(desk.store(), &err))?;

    info!(record_id = record.id, "translate command finished");
    render_translation(&record, ctx.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use reqwest::{Client, Url};
    use serde_json::json;

    use crate::cli::OutputFormat;
    use crate::client::HttpTicketApi;
    use parley_api_models::Language;

    fn context_for(server: &MockServer) -> AppContext {
        let base: Url = server.base_url().parse().expect("valid URL");
        AppContext {
            api: HttpTicketApi::new(Client::new(), &base),
            output: OutputFormat::Table,
        }
    }

    fn args(text: &[&str]) -> TranslateArgs {
        TranslateArgs {
            source: Language::En,
            target: Language::Pt,
            text: text.iter().map(|word| (*word).to_string()).collect(),
        }
    }

    fn record(status: &str, translated: Option<&str>) -> serde_json::Value {
        json!({
            "id": 1,
            "originalText": "Hello",
            "sourceLang": "en",
            "targetLang": "pt",
            "status": status,
            "translatedText": translated,
            "createdAt": "2025-01-01T10:00:00"
        })
    }

    #[tokio::test]
    async fn translate_runs_create_translate_and_refresh() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST).path("/tickets");
            then.status(201).json_body(record("CREATED", None));
        });
        let translate = server.mock(|when, then| {
            when.method(POST).path("/tickets/1/translate");
            then.status(200).json_body(record("TRANSLATED", Some("Olá")));
        });
        let list = server.mock(|when, then| {
            when.method(GET).path("/tickets");
            then.status(200)
                .json_body(json!([record("TRANSLATED", Some("Olá"))]));
        });

        handle_translate(&context_for(&server), args(&["Hello"]))
            .await
            .expect("translate succeeds");

        create.assert();
        translate.assert();
        list.assert();
    }

    #[tokio::test]
    async fn blank_text_is_a_validation_error_without_requests() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST).path("/tickets");
            then.status(201).json_body(record("CREATED", None));
        });

        let err = handle_translate(&context_for(&server), args(&["   "]))
            .await
            .expect_err("blank input rejected");

        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "Type something first.");
        create.assert_hits(0);
    }

    #[tokio::test]
    async fn backend_failure_surfaces_normalized_message() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/tickets");
            then.status(201).json_body(record("CREATED", None));
        });
        server.mock(|when, then| {
            when.method(POST).path("/tickets/1/translate");
            then.status(502)
                .json_body(json!({"error": "UPSTREAM", "message": "Translator unavailable"}));
        });

        let err = handle_translate(&context_for(&server), args(&["Hello"]))
            .await
            .expect_err("translate fails");

        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "Translator unavailable");
    }
}
