//! Filing a report: optional screenshot upload, then the insert.

use contracts::shared::database_error::DatabaseError;
use contracts::usecases::u501_submit_report::{
    screenshot_object_name, validate_description, NewRecord, ReportFormData, SCREENSHOT_BUCKET,
};
use uuid::Uuid;
use wasm_bindgen::JsValue;

use crate::shared::supabase::SupabaseClient;

/// Storage the submission is written to
#[allow(async_fn_in_trait)]
pub trait ReportSink {
    type Screenshot;

    /// Store the file and return its public URL
    async fn upload_screenshot(&self, file: &Self::Screenshot) -> Result<String, DatabaseError>;

    async fn insert_report(&self, record: &NewRecord) -> Result<(), DatabaseError>;
}

/// Upload first when a screenshot is attached; an upload failure is
/// returned as is and nothing is inserted.
pub async fn submit_with<S: ReportSink>(
    sink: &S,
    form: ReportFormData,
    screenshot: Option<&S::Screenshot>,
) -> Result<NewRecord, DatabaseError> {
    validate_description(&form.description)
        .map_err(|e| DatabaseError::with_code(e.to_string(), "validation"))?;

    let screenshot_url = match screenshot {
        Some(file) => Some(sink.upload_screenshot(file).await?),
        None => None,
    };

    let record = form.into_record(screenshot_url);
    sink.insert_report(&record).await?;
    Ok(record)
}

pub async fn submit_report(
    client: &SupabaseClient,
    form: ReportFormData,
    screenshot: Option<&web_sys::File>,
) -> Result<NewRecord, DatabaseError> {
    submit_with(client, form, screenshot).await
}

impl ReportSink for SupabaseClient {
    type Screenshot = web_sys::File;

    async fn upload_screenshot(&self, file: &web_sys::File) -> Result<String, DatabaseError> {
        let object = screenshot_object_name(&file.name(), Uuid::new_v4());
        self.upload_object(
            SCREENSHOT_BUCKET,
            &object,
            JsValue::from(file.clone()),
            &file.type_(),
            "uploading screenshot",
        )
        .await
    }

    async fn insert_report(&self, record: &NewRecord) -> Result<(), DatabaseError> {
        let table = record.collection_name();
        match record {
            NewRecord::Bug(row) => self.insert_row(table, row, "submitting bug report").await,
            NewRecord::Suggestion(row) => self.insert_row(table, row, "submitting suggestion").await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u501_submit_report::ReportKind;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeSink {
        fail_upload: bool,
        fail_insert: bool,
        uploads: RefCell<Vec<String>>,
        inserted: RefCell<Vec<NewRecord>>,
    }

    impl ReportSink for FakeSink {
        type Screenshot = &'static str;

        async fn upload_screenshot(&self, file: &&'static str) -> Result<String, DatabaseError> {
            if self.fail_upload {
                return Err(DatabaseError::with_code("The object exceeded the maximum allowed size", "413"));
            }
            self.uploads.borrow_mut().push(file.to_string());
            Ok(format!("https://demo.supabase.co/storage/v1/object/public/screenshots/{}", file))
        }

        async fn insert_report(&self, record: &NewRecord) -> Result<(), DatabaseError> {
            if self.fail_insert {
                return Err(DatabaseError::with_code("permission denied for table bug_reports", "42501"));
            }
            self.inserted.borrow_mut().push(record.clone());
            Ok(())
        }
    }

    fn bug(description: &str) -> ReportFormData {
        ReportFormData {
            kind: ReportKind::Bug,
            description: description.into(),
            app_version: "1.2.0".into(),
        }
    }

    #[test]
    fn bug_without_screenshot_inserts_once_with_null_url() {
        let sink = FakeSink::default();
        let record = block_on(submit_with(&sink, bug("Crash on save"), None)).unwrap();

        assert_eq!(record.collection_name(), "bug_reports");
        assert_eq!(record.screenshot_url(), None);
        assert!(sink.uploads.borrow().is_empty());
        let inserted = sink.inserted.borrow();
        assert_eq!(inserted.len(), 1);
        match &inserted[0] {
            NewRecord::Bug(row) => {
                assert_eq!(row.status.as_str(), "new");
                assert_eq!(row.app_version.as_deref(), Some("1.2.0"));
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn uploaded_url_is_attached_to_the_record() {
        let sink = FakeSink::default();
        let form = ReportFormData {
            kind: ReportKind::Suggestion,
            description: "Dark mode".into(),
            app_version: String::new(),
        };
        let record = block_on(submit_with(&sink, form, Some(&"a.png"))).unwrap();

        assert_eq!(record.collection_name(), "suggestions");
        assert_eq!(
            record.screenshot_url(),
            Some("https://demo.supabase.co/storage/v1/object/public/screenshots/a.png")
        );
        assert_eq!(sink.inserted.borrow().len(), 1);
    }

    #[test]
    fn failed_upload_creates_nothing() {
        let sink = FakeSink {
            fail_upload: true,
            ..FakeSink::default()
        };
        let err = block_on(submit_with(&sink, bug("Crash"), Some(&"big.png"))).unwrap_err();

        assert_eq!(err.message, "The object exceeded the maximum allowed size");
        assert!(sink.inserted.borrow().is_empty());
    }

    #[test]
    fn insert_error_is_returned() {
        let sink = FakeSink {
            fail_insert: true,
            ..FakeSink::default()
        };
        let err = block_on(submit_with(&sink, bug("Crash"), None)).unwrap_err();
        assert_eq!(err.code.as_deref(), Some("42501"));
    }

    #[test]
    fn blank_description_never_reaches_the_backend() {
        let sink = FakeSink::default();
        let err = block_on(submit_with(&sink, bug("   "), Some(&"a.png"))).unwrap_err();

        assert_eq!(err.message, "Please provide a description");
        assert_eq!(err.code.as_deref(), Some("validation"));
        assert!(sink.uploads.borrow().is_empty());
        assert!(sink.inserted.borrow().is_empty());
    }
}
