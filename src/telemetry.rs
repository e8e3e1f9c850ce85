use prometheus::{register_counter_vec, register_int_counter, CounterVec, IntCounter};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: CounterVec = register_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions handed out by the quiz picker",
        &["category"]
    )
    .unwrap();
    pub static ref QUESTIONS_CREATED: IntCounter = register_int_counter!(
        "questions_created_total",
        "Number of questions created through the API"
    )
    .unwrap();
    pub static ref QUESTIONS_DELETED: IntCounter = register_int_counter!(
        "questions_deleted_total",
        "Number of questions deleted through the API"
    )
    .unwrap();
}

pub fn init_tracing() {
    let mut fmt_layer = fmt::layer();
    if std::env::var("INCLUDE_SPAN_EVENTS").is_ok_and(|value| value.eq_ignore_ascii_case("true")) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
