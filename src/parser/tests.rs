//! Tests for the HTTP parser.

#[cfg(test)]
mod tests {
    use crate::parser::{parse_request, parse_request_with, Error, HeaderPolicy, Method};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.path, "/index.html");
        assert_eq!(result.version, "HTTP/1.1");
        assert_eq!(result.header("Host"), Some("example.com"));
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_start_line_tokens_are_exact() {
        let cases: &[(&[u8], &str, &str, &str)] = &[
            (b"GET / HTTP/1.1\r\n\r\n", "GET", "/", "HTTP/1.1"),
            (b"POST /files/a.txt HTTP/1.0\r\n\r\n", "POST", "/files/a.txt", "HTTP/1.0"),
            (b"BREW /pot?milk=yes HTCPCP/1.0\r\n\r\n", "BREW", "/pot?milk=yes", "HTCPCP/1.0"),
        ];

        for (input, method, path, version) in cases {
            let result = parse_request(input).unwrap();
            assert_eq!(result.method.as_str(), *method);
            assert_eq!(result.path, *path);
            assert_eq!(result.version, *version);
        }
    }

    #[test]
    fn test_unknown_method_is_kept_verbatim() {
        let result = parse_request(b"DELETE /x HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.method, Method::Other("DELETE".to_string()));
        assert!(!result.is_get());
        assert!(!result.is_post());
    }

    #[test]
    fn test_parse_request_with_multiple_headers() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test\r\nAccept: */*\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.len(), 3);
        assert_eq!(result.header("Host"), Some("example.com"));
        assert_eq!(result.header("User-Agent"), Some("test"));
        assert_eq!(result.header("Accept"), Some("*/*"));
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let result = parse_request(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();
        assert_eq!(result.header("Host"), Some("example.com"));
        assert_eq!(result.header("host"), None);
    }

    #[test]
    fn test_duplicate_header_last_write_wins() {
        let result = parse_request(b"GET / HTTP/1.1\r\nX-Id: 1\r\nX-Id: 2\r\n\r\n").unwrap();
        assert_eq!(result.headers.len(), 1);
        assert_eq!(result.header("X-Id"), Some("2"));
    }

    #[test]
    fn test_header_value_splits_on_first_separator() {
        let request = b"GET / HTTP/1.1\r\nX-Test: value: with: separators\r\nX-Colon: a:b\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.header("X-Test"), Some("value: with: separators"));
        assert_eq!(result.header("X-Colon"), Some("a:b"));
    }

    #[test]
    fn test_header_value_is_not_trimmed() {
        let result = parse_request(b"GET / HTTP/1.1\r\nX-Pad:   spaced  \r\n\r\n").unwrap();
        assert_eq!(result.header("X-Pad"), Some("  spaced  "));
    }

    #[test]
    fn test_empty_header_section() {
        let result = parse_request(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        assert!(result.headers.is_empty());
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_malformed_headers_are_skipped_leniently() {
        let request = b"GET / HTTP/1.1\r\nHost: example.com\r\nInvalidHeader\r\nNoSpace:here\r\nAccept: */*\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.len(), 2);
        assert_eq!(result.header("Host"), Some("example.com"));
        assert_eq!(result.header("Accept"), Some("*/*"));
        assert!(!result.headers.contains("InvalidHeader"));
    }

    #[test]
    fn test_non_utf8_header_line_is_skipped_leniently() {
        let request = b"GET / HTTP/1.1\r\nX-Bad: \xff\xfe\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.len(), 1);
        assert_eq!(result.header("Host"), Some("example.com"));
    }

    #[test]
    fn test_strict_policy_rejects_malformed_header() {
        let request = b"GET / HTTP/1.1\r\nHost: example.com\r\nInvalidHeader\r\n\r\n";
        let result = parse_request_with(request, HeaderPolicy::Strict);
        assert!(matches!(result, Err(Error::MalformedHeader(ref line)) if line == "InvalidHeader"));
    }

    #[test]
    fn test_strict_policy_accepts_well_formed_headers() {
        let request = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request_with(request, HeaderPolicy::Strict).unwrap();
        assert_eq!(result.header("Host"), Some("example.com"));
    }

    #[test]
    fn test_body_follows_header_terminator() {
        let request = b"POST /files/out.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let result = parse_request(request).unwrap();
        assert!(result.is_post());
        assert_eq!(result.header("Content-Length"), Some("5"));
        assert_eq!(result.body, b"hello");
    }

    #[test]
    fn test_zero_padding_is_stripped_from_body() {
        let mut buffer = vec![0u8; 256];
        let request = b"POST /files/a HTTP/1.1\r\n\r\nhello";
        buffer[..request.len()].copy_from_slice(request);

        let result = parse_request(&buffer).unwrap();
        assert_eq!(result.body, b"hello");
    }

    #[test]
    fn test_zero_padding_without_body() {
        let mut buffer = vec![0u8; 64];
        let request = b"GET / HTTP/1.1\r\n\r\n";
        buffer[..request.len()].copy_from_slice(request);

        let result = parse_request(&buffer).unwrap();
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_binary_body_is_preserved() {
        let request = b"POST /files/bin HTTP/1.1\r\n\r\n\x00\x01\xff\r\n\x7f";
        let result = parse_request(request).unwrap();
        assert_eq!(result.body, b"\x00\x01\xff\r\n\x7f");
    }

    #[test]
    fn test_missing_crlf_is_malformed() {
        let result = parse_request(b"GET / HTTP/1.1");
        assert!(matches!(result, Err(Error::MissingStartLine)));
    }

    #[test]
    fn test_empty_request_is_malformed() {
        assert!(matches!(parse_request(b""), Err(Error::MissingStartLine)));
    }

    #[test]
    fn test_missing_header_terminator() {
        let result = parse_request(b"GET / HTTP/1.1\r\nHost: example.com\r\n");
        assert!(matches!(result, Err(Error::MissingHeaderTerminator)));
    }

    #[test]
    fn test_incomplete_request_line() {
        let result = parse_request(b"GET\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(ref line)) if line == "GET"));
    }

    #[test]
    fn test_request_line_with_extra_token() {
        let result = parse_request(b"GET / HTTP/1.1 extra\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_request_line_splits_on_single_spaces() {
        // Two spaces produce an empty token, so there are four tokens.
        let result = parse_request(b"GET  / HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_non_utf8_request_line() {
        let result = parse_request(b"GET /\xff HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }
}
