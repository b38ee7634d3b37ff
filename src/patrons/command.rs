pub mod patron_report_cmd;
