use crate::helpers::{request_with_cookie, send_back};
use http::header::COOKIE;
use http::{HeaderMap, HeaderValue};
use signed_cookies::{Cookie, CookieError, read, write};

fn sample_values() -> Vec<Vec<u8>> {
    vec![
        vec![],
        b"12345686790".to_vec(),
        b"a value with spaces; semicolons, commas and \"quotes\"".to_vec(),
        "ünïcödé ✓".as_bytes().to_vec(),
        vec![0x00, 0x80, 0xfe, 0xff],
        (0..=255u8).collect(),
    ]
}

#[test]
fn arbitrary_bytes_survive_a_round_trip() {
    for value in sample_values() {
        let mut response_headers = HeaderMap::new();
        write(&mut response_headers, Cookie::new("DemoCookie", value.clone())).unwrap();

        let request_headers = send_back(&response_headers);
        assert_eq!(read(&request_headers, "DemoCookie").unwrap(), value);
    }
}

#[test]
fn the_requested_cookie_is_picked_among_many() {
    let mut response_headers = HeaderMap::new();
    write(&mut response_headers, Cookie::new("first", "1")).unwrap();
    write(&mut response_headers, Cookie::new("second", "2")).unwrap();
    write(&mut response_headers, Cookie::new("third", "3")).unwrap();

    let request_headers = send_back(&response_headers);
    assert_eq!(read(&request_headers, "second").unwrap(), b"2");
}

#[test]
fn a_missing_cookie_is_not_found() {
    let request_headers = request_with_cookie("other", "MQ==");
    let err = read(&request_headers, "DemoCookie").unwrap_err();
    assert!(matches!(err, CookieError::NotFound { name } if name == "DemoCookie"));
}

#[test]
fn an_undecodable_value_is_invalid() {
    let request_headers = request_with_cookie("DemoCookie", "not*base64");
    let err = read(&request_headers, "DemoCookie").unwrap_err();
    assert!(matches!(err, CookieError::InvalidValue));
}

#[test]
fn a_malformed_sibling_does_not_hide_the_cookie() {
    let mut response_headers = HeaderMap::new();
    write(&mut response_headers, Cookie::new("DemoCookie", "12345686790")).unwrap();
    let request_headers = send_back(&response_headers);
    let pair = request_headers[COOKIE].to_str().unwrap();

    for sibling in ["junk", "=x", "tracker=✓"] {
        let mut header = sibling.as_bytes().to_vec();
        header.extend_from_slice(b"; ");
        header.extend_from_slice(pair.as_bytes());
        let mut request_headers = HeaderMap::new();
        request_headers.insert(COOKIE, HeaderValue::from_bytes(&header).unwrap());

        assert_eq!(read(&request_headers, "DemoCookie").unwrap(), b"12345686790");
    }
}

#[test]
fn the_first_of_duplicate_cookies_wins() {
    let mut request_headers = HeaderMap::new();
    request_headers.append(COOKIE, HeaderValue::from_static("DemoCookie=Zmlyc3Q="));
    request_headers.append(COOKIE, HeaderValue::from_static("DemoCookie=c2Vjb25k"));
    assert_eq!(read(&request_headers, "DemoCookie").unwrap(), b"first");

    let request_headers = request_with_cookie("DemoCookie", "Zmlyc3Q=; DemoCookie=c2Vjb25k");
    assert_eq!(read(&request_headers, "DemoCookie").unwrap(), b"first");
}

#[test]
fn a_non_ascii_value_is_skipped() {
    let mut request_headers = HeaderMap::new();
    request_headers.insert(COOKIE, HeaderValue::from_bytes(b"DemoCookie=\xe2\x9c\x93").unwrap());
    let err = read(&request_headers, "DemoCookie").unwrap_err();
    assert!(matches!(err, CookieError::NotFound { .. }));
}
