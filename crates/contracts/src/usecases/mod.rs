pub mod u501_submit_report;
