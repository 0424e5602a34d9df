//! Единый тип ошибок публичного API.
//!
//! Сам расчёт (parse → aggregate → validate → derive → project → assemble)
//! ошибок не возвращает: всё, что не удалось распознать, превращается в
//! явную пометку «данные недоступны». Ошибки возникают только на границе
//! ввода-вывода.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModalinError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ModalinError>;
