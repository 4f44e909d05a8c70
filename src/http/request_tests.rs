//! Tests for request assembly.

use super::error::RequestError;
use super::request::{
    BODY_SENTINEL, MultipartPart, ParamLocation, PartContent, RequestBody, RequestBuilder,
};
use serde_json::json;

fn base() -> url::Url {
    url::Url::parse("https://api.example.com/api").unwrap()
}

mod set_once_semantics {
    use super::*;

    #[test]
    fn second_method_write_is_ignored() {
        let mut builder = RequestBuilder::new();
        builder.set_method(http::Method::GET);
        builder.set_method(http::Method::POST);

        assert_eq!(builder.method(), Some(&http::Method::GET));
    }

    #[test]
    fn second_path_write_is_ignored() {
        let mut builder = RequestBuilder::new();
        builder.set_path("document");
        builder.set_path("download_final_document");

        assert_eq!(builder.path(), Some("document"));
    }

    #[test]
    fn first_values_survive_build() {
        let mut builder = RequestBuilder::new();
        builder.set_method(http::Method::DELETE);
        builder.set_path("document");
        builder.set_method(http::Method::GET);
        builder.set_path("other");

        let request = builder.build(&base()).unwrap();

        assert_eq!(request.method, http::Method::DELETE);
        assert!(request.url.as_str().ends_with("/api/document"));
    }
}

mod query_params {
    use super::*;

    #[test]
    fn params_accumulate_in_call_order() {
        let mut builder = RequestBuilder::new();
        builder
            .add_param(ParamLocation::Query, "access_key", "k")
            .unwrap();
        builder.add_param(ParamLocation::Query, "type", "all").unwrap();

        assert_eq!(
            builder.query(),
            &[
                ("access_key".to_owned(), "k".to_owned()),
                ("type".to_owned(), "all".to_owned()),
            ]
        );
    }

    #[test]
    fn duplicate_keys_produce_two_entries() {
        let mut builder = RequestBuilder::new();
        builder.add_param(ParamLocation::Query, "tag", "first").unwrap();
        builder.add_param(ParamLocation::Query, "tag", "second").unwrap();

        assert_eq!(
            builder.query(),
            &[
                ("tag".to_owned(), "first".to_owned()),
                ("tag".to_owned(), "second".to_owned()),
            ]
        );
    }

    #[test]
    fn values_are_stringified() {
        let mut builder = RequestBuilder::new();
        builder.add_param(ParamLocation::Query, "count", 5).unwrap();
        builder.add_param(ParamLocation::Query, "flag_on", true).unwrap();
        builder.add_param(ParamLocation::Query, "flag_off", false).unwrap();
        builder
            .add_param(ParamLocation::Query, "empty", serde_json::Value::Null)
            .unwrap();

        assert_eq!(
            builder.query(),
            &[
                ("count".to_owned(), "5".to_owned()),
                ("flag_on".to_owned(), "1".to_owned()),
                ("flag_off".to_owned(), "0".to_owned()),
                ("empty".to_owned(), String::new()),
            ]
        );
    }
}

mod header_params {
    use super::*;

    #[test]
    fn header_is_set() {
        let mut builder = RequestBuilder::new();
        builder
            .add_param(ParamLocation::Headers, "x-request-id", "abc")
            .unwrap();

        assert_eq!(builder.headers().get("x-request-id").unwrap(), "abc");
    }

    #[test]
    fn later_write_overwrites_earlier() {
        let mut builder = RequestBuilder::new();
        builder
            .add_param(ParamLocation::Headers, "x-request-id", "first")
            .unwrap();
        builder
            .add_param(ParamLocation::Headers, "x-request-id", "second")
            .unwrap();

        assert_eq!(builder.headers().get("x-request-id").unwrap(), "second");
        assert_eq!(builder.headers().get_all("x-request-id").iter().count(), 1);
    }

    #[test]
    fn invalid_header_name_fails_fast() {
        let mut builder = RequestBuilder::new();
        let err = builder
            .add_param(ParamLocation::Headers, "bad header", "v")
            .unwrap_err();

        assert!(matches!(err, RequestError::InvalidHeader { .. }));
    }
}

mod body_params {
    use super::*;

    #[test]
    fn sentinel_key_replaces_entire_body() {
        let payload = json!({"title": "Contract", "signers": []});
        let mut builder = RequestBuilder::new();
        builder
            .add_param(ParamLocation::Body, BODY_SENTINEL, payload.clone())
            .unwrap();

        assert_eq!(*builder.body(), RequestBody::Json(payload));
    }

    #[test]
    fn non_sentinel_key_becomes_multipart_json_field() {
        let mut builder = RequestBuilder::new();
        builder
            .add_param(ParamLocation::Body, "meta", json!({"k": 1}))
            .unwrap();

        assert_eq!(
            *builder.body(),
            RequestBody::Multipart(vec![MultipartPart {
                name: "meta".to_owned(),
                content: PartContent::JsonField(json!({"k": 1})),
            }])
        );
    }

    #[test]
    fn multipart_field_after_json_body_conflicts() {
        let mut builder = RequestBuilder::new();
        builder
            .add_param(ParamLocation::Body, BODY_SENTINEL, json!({}))
            .unwrap();

        let err = builder
            .add_param(ParamLocation::Body, "meta", json!(1))
            .unwrap_err();

        assert!(matches!(
            err,
            RequestError::BodyConflict {
                existing: "json",
                requested: "json field",
            }
        ));
    }
}

mod form_params {
    use super::*;

    #[test]
    fn fields_are_inserted() {
        let mut builder = RequestBuilder::new();
        builder.add_param(ParamLocation::Form, "name", "Alice").unwrap();
        builder.add_param(ParamLocation::Form, "role", "signer").unwrap();

        let RequestBody::Form(fields) = builder.body() else {
            panic!("Expected form body, got {:?}", builder.body());
        };
        assert_eq!(fields.get("name").unwrap(), "Alice");
        assert_eq!(fields.get("role").unwrap(), "signer");
    }

    #[test]
    fn duplicate_key_overwrites() {
        let mut builder = RequestBuilder::new();
        builder.add_param(ParamLocation::Form, "name", "Alice").unwrap();
        builder.add_param(ParamLocation::Form, "name", "Bob").unwrap();

        let RequestBody::Form(fields) = builder.body() else {
            panic!("Expected form body, got {:?}", builder.body());
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("name").unwrap(), "Bob");
    }

    #[test]
    fn form_field_after_multipart_body_conflicts() {
        let mut builder = RequestBuilder::new();
        builder.add_param(ParamLocation::File, "file", "a.pdf").unwrap();

        let err = builder
            .add_param(ParamLocation::Form, "name", "Alice")
            .unwrap_err();

        assert!(matches!(
            err,
            RequestError::BodyConflict {
                existing: "multipart",
                requested: "form field",
            }
        ));
    }
}

mod file_params {
    use super::*;

    #[test]
    fn path_value_becomes_file_part() {
        let mut builder = RequestBuilder::new();
        builder
            .add_param(ParamLocation::File, "file", "/tmp/contract.pdf")
            .unwrap();

        assert_eq!(
            *builder.body(),
            RequestBody::Multipart(vec![MultipartPart {
                name: "file".to_owned(),
                content: PartContent::FilePath("/tmp/contract.pdf".into()),
            }])
        );
    }

    #[test]
    fn file_and_json_field_share_one_multipart_body() {
        let mut builder = RequestBuilder::new();
        builder
            .add_param(ParamLocation::Body, "meta", json!({"k": 1}))
            .unwrap();
        builder
            .add_param(ParamLocation::File, "file", "/tmp/contract.pdf")
            .unwrap();

        let RequestBody::Multipart(parts) = builder.body() else {
            panic!("Expected multipart body, got {:?}", builder.body());
        };
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn non_string_value_fails_fast() {
        let mut builder = RequestBuilder::new();
        let err = builder
            .add_param(ParamLocation::File, "file", 42)
            .unwrap_err();

        assert!(matches!(err, RequestError::InvalidFileParam { .. }));
    }

    #[test]
    fn in_memory_bytes_become_file_part() {
        let mut builder = RequestBuilder::new();
        builder
            .add_file_bytes("file", "contract.pdf", b"%PDF-1.4".to_vec())
            .unwrap();

        assert_eq!(
            *builder.body(),
            RequestBody::Multipart(vec![MultipartPart {
                name: "file".to_owned(),
                content: PartContent::FileBytes {
                    file_name: "contract.pdf".to_owned(),
                    bytes: b"%PDF-1.4".to_vec(),
                },
            }])
        );
    }
}

mod optional_params {
    use super::*;

    const TABLE: &[(&str, ParamLocation)] = &[
        ("a", ParamLocation::Query),
        ("b", ParamLocation::Form),
    ];

    #[test]
    fn supplied_pairs_are_routed_per_table() {
        let mut builder = RequestBuilder::new();
        builder
            .add_optional_params(
                TABLE,
                vec![
                    ("a".to_owned(), json!(1)),
                    ("c".to_owned(), json!(2)),
                    ("b".to_owned(), json!(3)),
                ],
            )
            .unwrap();

        assert_eq!(builder.query(), &[("a".to_owned(), "1".to_owned())]);
        let RequestBody::Form(fields) = builder.body() else {
            panic!("Expected form body, got {:?}", builder.body());
        };
        assert_eq!(fields.get("b").unwrap(), "3");
    }

    #[test]
    fn unknown_keys_leave_no_trace() {
        let mut builder = RequestBuilder::new();
        builder
            .add_optional_params(TABLE, vec![("c".to_owned(), json!("dropped"))])
            .unwrap();

        assert!(builder.query().is_empty());
        assert_eq!(*builder.body(), RequestBody::None);
        assert!(builder.headers().is_empty());
    }

    #[test]
    fn empty_supply_is_a_no_op() {
        let mut builder = RequestBuilder::new();
        builder.add_optional_params(TABLE, vec![]).unwrap();

        assert!(builder.query().is_empty());
        assert_eq!(*builder.body(), RequestBody::None);
    }
}

mod build {
    use super::*;

    #[test]
    fn missing_method_is_an_error() {
        let mut builder = RequestBuilder::new();
        builder.set_path("document");

        let err = builder.build(&base()).unwrap_err();

        assert!(matches!(err, RequestError::MissingMethod));
    }

    #[test]
    fn missing_path_is_an_error() {
        let mut builder = RequestBuilder::new();
        builder.set_method(http::Method::GET);

        let err = builder.build(&base()).unwrap_err();

        assert!(matches!(err, RequestError::MissingPath));
    }

    #[test]
    fn path_is_appended_to_base_path() {
        let mut builder = RequestBuilder::new();
        builder.set_method(http::Method::GET);
        builder.set_path("document");

        let request = builder.build(&base()).unwrap();

        assert_eq!(request.url.as_str(), "https://api.example.com/api/document");
    }

    #[test]
    fn leading_slash_and_trailing_slash_are_normalized() {
        let slashed = url::Url::parse("https://api.example.com/api/").unwrap();
        let mut builder = RequestBuilder::new();
        builder.set_method(http::Method::GET);
        builder.set_path("/document");

        let request = builder.build(&slashed).unwrap();

        assert_eq!(request.url.as_str(), "https://api.example.com/api/document");
    }

    #[test]
    fn built_request_carries_all_accumulated_state() {
        let mut builder = RequestBuilder::new();
        builder.set_method(http::Method::POST);
        builder.set_path("document");
        builder.add_param(ParamLocation::Query, "access_key", "k").unwrap();
        builder
            .add_param(ParamLocation::Headers, "x-request-id", "abc")
            .unwrap();
        builder
            .add_param(ParamLocation::Body, BODY_SENTINEL, json!({"title": "t"}))
            .unwrap();

        let request = builder.build(&base()).unwrap();

        assert_eq!(request.method, http::Method::POST);
        assert_eq!(request.query, vec![("access_key".to_owned(), "k".to_owned())]);
        assert_eq!(request.headers.get("x-request-id").unwrap(), "abc");
        assert_eq!(request.body, RequestBody::Json(json!({"title": "t"})));
    }
}
