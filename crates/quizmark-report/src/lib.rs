//! quizmark-report: HTML rendering of quiz feedback and batch reports.

pub mod html;

pub use html::{generate_html, render_grade, render_model_answers, render_saved, write_html_report};
