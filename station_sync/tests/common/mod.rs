#![allow(dead_code)]

use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use std::path::PathBuf;
use tempfile::TempDir;

use station_sync::db::{connection, migrate};

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    n: i64,
}

pub struct TestDb {
    _dir: TempDir, // keep alive for the life of the test
    pub path: String,
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run_sqlite(&path).expect("migrations");

    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

pub fn count(conn: &mut SqliteConnection, table: &str) -> i64 {
    diesel::sql_query(format!("SELECT COUNT(*) AS n FROM {table}"))
        .get_result::<Count>(conn)
        .expect("count query")
        .n
}

/// One domain ("de") with two cities (14, 22) and three places (5, 6, 7),
/// all places carrying a bike count.
pub const BASE_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<markers>
  <country domain="de" name="nextbike Germany" country="DE" lat="50.7" lng="10.5">
    <city uid="14" name="Leipzig" num_places="2" lat="51.34" lng="12.37">
      <place uid="5" number="4021" spot="1" name="Augustusplatz" lat="51.338" lng="12.38" terminal_type="sign" bikes="3"/>
      <place uid="6" number="4022" spot="0" name="Hauptbahnhof" lat="51.345" lng="12.381" bikes="7"/>
    </city>
    <city uid="22" name="Dresden" num_places="1">
      <place uid="7" name="Altmarkt" bikes="2"/>
    </city>
  </country>
</markers>
<!-- 05.03.2021 14:32 -->"#;

/// `BASE_FEED` plus one new domain ("at") with one new city (31) holding two
/// new places (8, 9).
pub const EXTENDED_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<markers>
  <country domain="de" name="nextbike Germany" country="DE" lat="50.7" lng="10.5">
    <city uid="14" name="Leipzig" num_places="2" lat="51.34" lng="12.37">
      <place uid="5" number="4021" spot="1" name="Augustusplatz" lat="51.338" lng="12.38" terminal_type="sign" bikes="3"/>
      <place uid="6" number="4022" spot="0" name="Hauptbahnhof" lat="51.345" lng="12.381" bikes="7"/>
    </city>
    <city uid="22" name="Dresden" num_places="1">
      <place uid="7" name="Altmarkt" bikes="2"/>
    </city>
  </country>
  <country domain="at" name="nextbike Austria" country="AT">
    <city uid="31" name="Wien">
      <place uid="8" name="Stephansplatz" bikes="1"/>
      <place uid="9" name="Praterstern" bikes="4"/>
    </city>
  </country>
</markers>
<!-- 06.03.2021 09:00 -->"#;

pub fn base_tree() -> feed_ingestor::FeedTree {
    feed_ingestor::feed::parse_feed(BASE_FEED).expect("base feed parses")
}

pub fn extended_tree() -> feed_ingestor::FeedTree {
    feed_ingestor::feed::parse_feed(EXTENDED_FEED).expect("extended feed parses")
}

pub fn seed_catalog(conn: &mut SqliteConnection) {
    station_sync::catalog::reconcile(conn, &base_tree()).expect("seed reconcile");
}
