// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use tempfile::TempDir;
    use tempfile::tempdir;
    use tokio::spawn;

    use crate::cmd::serve::server::ServerConfig;
    use crate::cmd::serve::server::start_server;
    use crate::error::Fallible;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    async fn start_test_server() -> Fallible<(TempDir, u16)> {
        let dir = tempdir()?;
        let port = pick_unused_port().unwrap();
        let config = ServerConfig {
            directory: Some(dir.path().display().to_string()),
            host: TEST_HOST.to_string(),
            port,
        };
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;
        Ok((dir, port))
    }

    fn url(port: u16, path: &str) -> String {
        format!("http://{TEST_HOST}:{port}{path}")
    }

    /// Creates a deck through the form and returns the main page that the
    /// redirect lands on.
    async fn create_deck(port: u16, title: &str, cards: &str) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(url(port, "/decks/new"))
            .form(&[("title", title), ("cards", cards)])
            .send()
            .await?;
        assert!(response.status().is_success());
        Ok(response.text().await?)
    }

    /// Finds the Study link on the main page and returns its path.
    fn quiz_path(html: &str) -> String {
        for (idx, _) in html.match_indices("/decks/") {
            let rest = &html[idx..];
            if let Some(end) = rest.find('"') {
                let path = &rest[..end];
                if path.ends_with("/quiz") {
                    return path.to_string();
                }
            }
        }
        panic!("no quiz link found in: {html}");
    }

    fn deck_id(html: &str) -> String {
        let path = quiz_path(html);
        path.strip_prefix("/decks/")
            .unwrap()
            .strip_suffix("/quiz")
            .unwrap()
            .to_string()
    }

    async fn quiz_command(port: u16, action: &str) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(url(port, "/quiz"))
            .form(&[("action", action)])
            .send()
            .await?;
        assert!(response.status().is_success());
        Ok(response.text().await?)
    }

    #[tokio::test]
    async fn test_start_server_on_non_existent_directory() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let config = ServerConfig {
            directory: Some("./derpherp".to_string()),
            host: TEST_HOST.to_string(),
            port,
        };
        let result = start_server(config).await;
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
        Ok(())
    }

    #[tokio::test]
    async fn test_static_routes() -> Fallible<()> {
        let (_dir, port) = start_test_server().await?;

        let response = reqwest::get(url(port, "/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        let response = reqwest::get(url(port, "/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let (_dir, port) = start_test_server().await?;

        // The empty main page.
        let response = reqwest::get(url(port, "/")).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("No decks yet"));

        // Create a deck through the form.
        let html = create_deck(
            port,
            "React",
            "What is React? | A library for managing user interfaces",
        )
        .await?;
        assert!(html.contains("Deck has been successfully created"));
        assert!(html.contains("React"));
        assert!(html.contains("1 card"));

        // Start the quiz: the question shows, the answer is gated.
        let path = quiz_path(&html);
        let html = reqwest::get(url(port, &path)).await?.text().await?;
        assert!(html.contains("Card 1 of 1"));
        assert!(html.contains("What is React?"));
        assert!(!html.contains("A library for managing user interfaces"));

        // Reveal shows the answer and does not advance.
        let html = quiz_command(port, "reveal").await?;
        assert!(html.contains("A library for managing user interfaces"));
        assert!(html.contains("Card 1 of 1"));

        // Scoring the only card correct completes the session.
        let html = quiz_command(port, "correct").await?;
        assert!(html.contains("Quiz complete"));
        assert!(html.contains("You got 1 out of 1 correct."));

        // Restart returns to the first card with zero tallies.
        let html = quiz_command(port, "restart").await?;
        assert!(html.contains("Card 1 of 1"));
        assert!(html.contains("Correct: 0 / Incorrect: 0"));
        Ok(())
    }

    #[tokio::test]
    async fn test_scoring_after_complete_is_rejected() -> Fallible<()> {
        let (_dir, port) = start_test_server().await?;
        let html = create_deck(port, "One", "q | a").await?;
        let path = quiz_path(&html);
        reqwest::get(url(port, &path)).await?;
        quiz_command(port, "correct").await?;

        let response = reqwest::Client::new()
            .post(url(port, "/quiz"))
            .form(&[("action", "correct")])
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = response.text().await?;
        assert!(body.contains("already complete"));
        Ok(())
    }

    #[tokio::test]
    async fn test_form_validation_keeps_entered_data() -> Fallible<()> {
        let (_dir, port) = start_test_server().await?;

        // Empty title.
        let html = create_deck(port, "", "q | a").await?;
        assert!(html.contains("Title must not be empty."));
        assert!(html.contains("q | a"));

        // Malformed card line.
        let html = create_deck(port, "History", "just a question").await?;
        assert!(html.contains("Line 1 is not in 'question | answer' form."));
        assert!(html.contains("just a question"));

        // Nothing was created either way.
        let html = reqwest::get(url(port, "/")).await?.text().await?;
        assert!(html.contains("No decks yet"));
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_flow() -> Fallible<()> {
        let (_dir, port) = start_test_server().await?;
        let html = create_deck(port, "React", "q1 | a1").await?;
        let id = deck_id(&html);

        // The edit form comes back prefilled.
        let html = reqwest::get(url(port, &format!("/decks/{id}")))
            .await?
            .text()
            .await?;
        assert!(html.contains("React"));
        assert!(html.contains("q1 | a1"));

        // Saving new contents lands back on the main page.
        let response = reqwest::Client::new()
            .post(url(port, &format!("/decks/{id}")))
            .form(&[("title", "React Native"), ("cards", "q1 | a1\nq2 | a2")])
            .send()
            .await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Deck has been successfully updated"));
        assert!(html.contains("React Native"));
        assert!(html.contains("2 cards"));

        // The id is unchanged.
        assert_eq!(deck_id(&html), id);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_flow() -> Fallible<()> {
        let (_dir, port) = start_test_server().await?;
        let html = create_deck(port, "Doomed", "q | a").await?;
        let id = deck_id(&html);
        let client = reqwest::Client::new();

        // Asking opens the confirm dialog.
        let response = client
            .post(url(port, "/"))
            .form(&[("action", "ask-delete"), ("id", &id)])
            .send()
            .await?;
        let html = response.text().await?;
        assert!(html.contains("Delete deck?"));
        assert!(html.contains("This deck and all it cards will be deleted."));

        // Cancelling closes it and deletes nothing.
        let response = client
            .post(url(port, "/"))
            .form(&[("action", "cancel-delete")])
            .send()
            .await?;
        let html = response.text().await?;
        assert!(!html.contains("Delete deck?"));
        assert!(html.contains("Doomed"));

        // Confirming deletes the deck and queues the snackbar.
        client
            .post(url(port, "/"))
            .form(&[("action", "ask-delete"), ("id", &id)])
            .send()
            .await?;
        let response = client
            .post(url(port, "/"))
            .form(&[("action", "delete")])
            .send()
            .await?;
        let html = response.text().await?;
        assert!(html.contains("Deck has been successfully deleted"));
        assert!(!html.contains("Doomed"));

        // Confirming again without an open dialog is rejected.
        let response = client
            .post(url(port, "/"))
            .form(&[("action", "delete")])
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_quiz_on_unknown_deck_is_not_found() -> Fallible<()> {
        let (_dir, port) = start_test_server().await?;
        let stale = flashdecks_core::DeckId::derive(1, 1, "gone").to_hex();
        let response = reqwest::get(url(port, &format!("/decks/{stale}/quiz"))).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_settings_flow() -> Fallible<()> {
        let (_dir, port) = start_test_server().await?;
        let client = reqwest::Client::new();

        let html = reqwest::get(url(port, "/settings")).await?.text().await?;
        assert!(!html.contains("checked"));

        // Turning the reminder on.
        let response = client
            .post(url(port, "/settings"))
            .form(&[("enabled", "on")])
            .send()
            .await?;
        let html = response.text().await?;
        assert!(html.contains("Settings saved"));
        assert!(html.contains("checked"));

        // Turning it back off: a checkbox that is not checked is simply
        // absent from the form body.
        let response = client
            .post(url(port, "/settings"))
            .form(&[("noop", "1")])
            .send()
            .await?;
        let html = response.text().await?;
        assert!(!html.contains("checked"));
        Ok(())
    }
}
