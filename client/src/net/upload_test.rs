use super::*;

#[test]
fn default_uploader_targets_fixed_endpoint() {
    let uploader = HttpUploader::default();
    assert_eq!(uploader.endpoint, "http://localhost:8000/api/upload");
}

#[test]
fn upload_field_is_file() {
    assert_eq!(UPLOAD_FIELD, "file");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_stub_reports_failure() {
    let uploader = HttpUploader::default();
    let file = UploadFile::new("report.pdf", crate::state::upload::PDF_MIME, 1);
    let result = futures::executor::block_on(uploader.send(&file, ()));
    assert!(result.is_err());
}
