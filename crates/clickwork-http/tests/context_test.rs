use clickwork_http::{Context, Session, UploadError, UploadPolicy};
use http::Method;
use rstest::rstest;

#[rstest]
fn test_session_survives_across_requests() {
	// Arrange
	let session = Session::new();
	let first = Context::builder()
		.path("/order.htm")
		.session(session.clone())
		.build()
		.unwrap();
	first.session().set("SUBMIT_CHECK_order", &42i64).unwrap();

	// Act
	let second = Context::builder()
		.method(Method::POST)
		.path("/order.htm")
		.session(session)
		.build()
		.unwrap();

	// Assert
	assert_eq!(second.session().get::<i64>("SUBMIT_CHECK_order"), Some(42));
}

#[rstest]
fn test_declared_content_length_drives_request_limit() {
	// Arrange
	let mut ctx = Context::builder()
		.method(Method::POST)
		.content_length(10_000)
		.build()
		.unwrap();

	// Act
	let result = UploadPolicy::new().with_size_max(1_000).apply(&mut ctx);

	// Assert
	assert!(matches!(
		result,
		Err(UploadError::SizeLimitExceeded {
			permitted: 1_000,
			actual: 10_000
		})
	));
	assert!(ctx.attributes().contains::<UploadError>());
}
