//! End-to-end REPL sessions driven by scripted input

use async_trait::async_trait;
use movieline::repl::io::{MockInput, MockLineStream, MockRenderStream, RenderCommand};
use movieline::repl::models::MovieQuery;
use movieline::repl::services::MoviePage;
use movieline::repl::testing::InMemoryMoviesApi;
use movieline::{ApiError, AppController, Movie, MovieId, MoviesApi, NewMovie, ViewModel};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

type TestController = AppController<MockLineStream, MockRenderStream>;

fn session(api: &Arc<InMemoryMoviesApi>, script: Vec<MockInput>) -> (TestController, MockRenderStream) {
    let render_stream = MockRenderStream::new();
    let view_model = ViewModel::new(api.clone(), 9);
    let controller = AppController::from_view_model(
        view_model,
        MockLineStream::new(script),
        render_stream.clone(),
    );
    (controller, render_stream)
}

fn line(text: &str) -> MockInput {
    MockInput::Line(text.to_string())
}

fn pause() -> MockInput {
    MockInput::Pause(Duration::from_millis(10))
}

fn titles(controller: &TestController) -> Vec<String> {
    controller
        .view_model()
        .store()
        .movies()
        .iter()
        .map(|movie| movie.title.clone())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn startup_should_render_first_page() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(12));
    let (mut controller, output) = session(&api, vec![]);

    controller.run().await.unwrap();

    let text = output.get_buffer_string();
    assert!(text.contains("Movies List (A-Z)"));
    assert!(text.contains("  [1] Movie 01 (2000) DVD"));
    assert!(text.contains("  [9] Movie 09 (2000) DVD"));
    assert!(!text.contains("Movie 10"));
    assert!(text.contains("Page 1  next >"));
}

#[tokio::test(start_paused = true)]
async fn paging_should_move_forward_and_back() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(12));
    let (mut controller, output) = session(&api, vec![line("next"), pause(), line("next")]);

    controller.run().await.unwrap();

    assert_eq!(titles(&controller), vec!["Movie 10", "Movie 11", "Movie 12"]);
    let text = output.get_buffer_string();
    assert!(text.contains("Page 2  < prev"));
    assert!(text.contains("Already on the last page"));

    let (mut controller, _) = session(
        &api,
        vec![line("n"), pause(), line("prev"), pause(), line("prev")],
    );
    controller.run().await.unwrap();

    assert_eq!(controller.view_model().list().page(), 1);
    assert_eq!(titles(&controller)[0], "Movie 01");
}

#[tokio::test(start_paused = true)]
async fn deleting_last_movie_on_page_should_step_back() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(10));
    let (mut controller, _output) = session(&api, vec![line("next"), pause(), line("delete 10")]);

    controller.run().await.unwrap();

    let view_model = controller.view_model();
    assert_eq!(api.movie_count(), 9);
    assert_eq!(view_model.list().page(), 1);
    assert_eq!(view_model.store().len(), 9);
    assert!(!view_model.list().has_more());
}

#[tokio::test(start_paused = true)]
async fn delete_of_hidden_movie_should_be_refused() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(12));
    let (mut controller, output) = session(&api, vec![line("delete 11")]);

    controller.run().await.unwrap();

    assert_eq!(api.movie_count(), 12);
    assert!(output
        .get_buffer_string()
        .contains("Error: Movie 11 is not on this page"));
}

#[tokio::test(start_paused = true)]
async fn show_should_expand_card_with_actors() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(3));
    let (mut controller, output) = session(&api, vec![line("show 2")]);

    controller.run().await.unwrap();

    assert!(output.get_buffer_string().contains("Actors: Actor 2"));
}

#[tokio::test(start_paused = true)]
async fn add_should_append_and_confirm() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(2));
    let (mut controller, output) = session(
        &api,
        vec![
            line("add Alien | 1979 | VHS | Sigourney Weaver"),
            line("add Heat | 1995"),
        ],
    );

    controller.run().await.unwrap();

    let text = output.get_buffer_string();
    assert!(text.contains("Movie added successfully!"));
    assert!(text.contains("Please fill in all fields."));
    assert_eq!(titles(&controller), vec!["Movie 01", "Movie 02", "Alien"]);
    assert_eq!(api.created_titles(), vec!["Alien"]);
}

#[tokio::test(start_paused = true)]
async fn import_should_report_tally() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "Title: Blazing Saddles\nRelease Year: 1974\nFormat: VHS\nStars: Mel Brooks, Clevon Little\n\n\
         Title: Casablanca\nRelease Year: 1942\nFormat: DVD\nStars: Humphrey Bogart\n"
    )
    .unwrap();
    let api = Arc::new(InMemoryMoviesApi::new());
    api.reject_title("Casablanca");
    let command = format!("import {}", file.path().display());
    let (mut controller, output) = session(&api, vec![line(&command)]);

    controller.run().await.unwrap();

    assert!(output.get_buffer_string().contains("Imported: 1, Failed: 1"));
    assert_eq!(titles(&controller), vec!["Blazing Saddles"]);
}

#[tokio::test(start_paused = true)]
async fn missing_startup_import_should_report_and_keep_running() {
    let dir = tempfile::tempdir().unwrap();
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(2));
    let (controller, output) = session(&api, vec![line("next")]);
    let mut controller = controller.with_initial_import(Some(dir.path().join("missing.txt")));

    controller.run().await.unwrap();

    let text = output.get_buffer_string();
    assert!(text.contains("Error reading file"));
    assert!(text.contains("Already on the last page"));
    assert!(api.created_titles().is_empty());
}

#[tokio::test(start_paused = true)]
async fn filter_typing_should_reload_once_settled() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(12));
    let (mut controller, output) = session(
        &api,
        vec![
            line("title Mov"),
            MockInput::Pause(Duration::from_millis(200)),
            line("title Movie 1"),
        ],
    );

    controller.run().await.unwrap();

    let queries = api.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[1].filters.title.as_deref(), Some("Movie 1"));
    assert_eq!(queries[1].offset, 0);
    assert_eq!(titles(&controller), vec!["Movie 10", "Movie 11", "Movie 12"]);
    assert!(output
        .get_buffer_string()
        .contains("Filtered by title \"Movie 1\""));
}

#[tokio::test(start_paused = true)]
async fn short_filter_should_not_reload() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(4));
    let (mut controller, _output) = session(&api, vec![line("actor A")]);

    controller.run().await.unwrap();

    assert_eq!(api.queries().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_startup_load_should_recover_on_reload() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(5));
    api.fail_next_lists(1);
    let (mut controller, output) = session(&api, vec![line("list")]);

    controller.run().await.unwrap();

    assert!(output.get_buffer_string().contains("Could not load movies"));
    assert_eq!(controller.view_model().store().len(), 5);
    assert!(controller.view_model().list().error().is_none());
}

#[tokio::test(start_paused = true)]
async fn unknown_command_should_print_error() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(1));
    let (mut controller, output) = session(&api, vec![line("frobnicate"), line("help")]);

    controller.run().await.unwrap();

    let text = output.get_buffer_string();
    assert!(text.contains("Error: Unknown command 'frobnicate'. Type 'help' for a list of commands."));
    assert!(text.contains("Commands:"));
}

#[tokio::test(start_paused = true)]
async fn clear_should_wipe_screen_and_reprint_page() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(2));
    let (mut controller, output) = session(&api, vec![line("clear")]);

    controller.run().await.unwrap();

    assert!(output.has_command(&RenderCommand::ClearScreen));
    assert_eq!(output.get_buffer_string().matches("Movies List (A-Z)").count(), 2);
}

#[tokio::test(start_paused = true)]
async fn quit_should_ignore_remaining_input() {
    let api = Arc::new(InMemoryMoviesApi::with_numbered_movies(3));
    let (mut controller, _output) = session(&api, vec![line("quit"), line("delete 1")]);

    controller.run().await.unwrap();

    assert_eq!(api.movie_count(), 3);
}

/// Catalog whose list endpoint panics after the first call
struct PanickingListApi {
    inner: InMemoryMoviesApi,
    lists: AtomicUsize,
}

#[async_trait]
impl MoviesApi for PanickingListApi {
    async fn list_movies(&self, query: &MovieQuery) -> Result<MoviePage, ApiError> {
        if self.lists.fetch_add(1, Ordering::SeqCst) > 0 {
            panic!("list endpoint blew up");
        }
        self.inner.list_movies(query).await
    }

    async fn get_movie(&self, id: MovieId) -> Result<Movie, ApiError> {
        self.inner.get_movie(id).await
    }

    async fn create_movie(&self, movie: &NewMovie) -> Result<Movie, ApiError> {
        self.inner.create_movie(movie).await
    }

    async fn delete_movie(&self, id: MovieId) -> Result<(), ApiError> {
        self.inner.delete_movie(id).await
    }
}

#[tokio::test(start_paused = true)]
async fn end_of_input_should_not_wait_for_a_crashed_page_load() {
    let api = Arc::new(PanickingListApi {
        inner: InMemoryMoviesApi::with_numbered_movies(12),
        lists: AtomicUsize::new(0),
    });
    let view_model = ViewModel::new(api.clone(), 9);
    let mut controller = AppController::from_view_model(
        view_model,
        MockLineStream::new(vec![line("next")]),
        MockRenderStream::new(),
    );

    tokio::time::timeout(Duration::from_secs(5), controller.run())
        .await
        .expect("controller should finish after the load task dies")
        .unwrap();

    assert_eq!(api.lists.load(Ordering::SeqCst), 2);
    assert_eq!(titles(&controller)[0], "Movie 01");
}
