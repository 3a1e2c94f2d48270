use chrono::NaiveDateTime;

/// Download name for the job log: `{YYYY}_{MM}_{DD}-{HH}_{MM}_{SS}.log`.
pub fn log_download_filename(at: NaiveDateTime) -> String {
    format!("{}.log", at.format("%Y_%m_%d-%H_%M_%S"))
}
