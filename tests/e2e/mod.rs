// End-to-end tests for the Podcast Backend API
//
// Each test spins the full axum router on an ephemeral port and drives it
// over HTTP. Gemini and object storage are replaced by in-process fakes and
// the database pool connects lazily to an address nothing listens on, so
// these tests need neither network access nor Docker.
//
// The repository tests in `test_podcast_repository` use a testcontainers
// PostgreSQL and are ignored unless run with `--ignored`.

mod helpers;
mod test_generate;
mod test_health;
mod test_podcast_repository;
mod test_podcasts;
mod test_script;
mod test_voices;
