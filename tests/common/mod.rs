#![allow(dead_code)]

use chinook_api::SqliteExecutor;
use sqlx::sqlite::SqlitePoolOptions;

const SCHEMA: &[&str] = &[
    "CREATE TABLE media_types (media_type_id INTEGER PRIMARY KEY, name TEXT)",
    "CREATE TABLE genres (genre_id INTEGER PRIMARY KEY, name TEXT)",
    "CREATE TABLE artists (artist_id INTEGER PRIMARY KEY, name TEXT)",
    "CREATE TABLE albums (album_id INTEGER PRIMARY KEY, title TEXT NOT NULL, artist_id INTEGER NOT NULL REFERENCES artists (artist_id))",
    "CREATE TABLE tracks (
        track_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        album_id INTEGER REFERENCES albums (album_id),
        media_type_id INTEGER REFERENCES media_types (media_type_id),
        genre_id INTEGER REFERENCES genres (genre_id),
        composer TEXT,
        milliseconds INTEGER,
        bytes INTEGER,
        unit_price REAL
    )",
    "CREATE TABLE playlists (playlist_id INTEGER PRIMARY KEY, name TEXT)",
    "CREATE TABLE playlist_track (
        playlist_id INTEGER NOT NULL REFERENCES playlists (playlist_id),
        track_id INTEGER NOT NULL REFERENCES tracks (track_id),
        PRIMARY KEY (playlist_id, track_id)
    )",
];

const SEED: &[&str] = &[
    "INSERT INTO media_types (name) VALUES ('MPEG audio file'), ('AAC audio file')",
    "INSERT INTO genres (name) VALUES
        ('Rock'), ('Jazz'), ('Metal'), ('Alternative & Punk'), ('Rock And Roll'), ('Blues'),
        ('Latin'), ('Reggae'), ('Pop'), ('Soundtrack'), ('Bossa Nova'), ('Easy Listening')",
    "INSERT INTO artists (name) VALUES ('AC/DC'), ('Accept')",
    "INSERT INTO albums (title, artist_id) VALUES ('For Those About To Rock We Salute You', 1), ('Balls to the Wall', 2)",
    "INSERT INTO tracks (name, album_id, media_type_id, genre_id, composer, milliseconds, bytes, unit_price) VALUES
        ('For Those About To Rock', 1, 1, 1, 'Angus Young', 343719, 11170334, 0.99),
        ('Put The Finger On You', 1, 1, 1, 'Angus Young', 205662, 6713451, 0.99),
        ('Let''s Get It Up', 1, 1, 1, 'Angus Young', 233926, 7636561, 0.99),
        ('Balls to the Wall', 2, 2, 1, NULL, 342562, 5510424, 0.99)",
    "INSERT INTO playlists (name) VALUES ('Music'), ('Movies')",
    "INSERT INTO playlist_track (playlist_id, track_id) VALUES (1, 1), (1, 2), (1, 4)",
];

/// Single-connection in-memory database, seeded with a slice of Chinook.
pub async fn seeded_executor() -> SqliteExecutor {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    for stmt in SCHEMA.iter().chain(SEED) {
        sqlx::query(*stmt).execute(&pool).await.expect("seed statement");
    }
    SqliteExecutor::new(pool)
}
