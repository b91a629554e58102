use crate::helpers::{demo_key, send_back};
use http::HeaderMap;
use http::header::SET_COOKIE;
use signed_cookies::signed::TAG_LENGTH;
use signed_cookies::{
    Cookie, CookieError, MAX_COOKIE_SIZE, encode, read, write, write_signed,
};

// 3069 raw bytes encode to exactly 4092 base64 characters.
const RAW_LENGTH: usize = 3069;

#[test]
fn a_cookie_of_exactly_the_maximum_size_is_written() {
    let mut response_headers = HeaderMap::new();
    let cookie = Cookie::new("abc", vec![b'x'; RAW_LENGTH]);
    write(&mut response_headers, cookie).unwrap();

    let set_cookie = response_headers[SET_COOKIE].to_str().unwrap();
    assert_eq!(set_cookie.len(), MAX_COOKIE_SIZE);

    let request_headers = send_back(&response_headers);
    assert_eq!(read(&request_headers, "abc").unwrap(), vec![b'x'; RAW_LENGTH]);
}

#[test]
fn one_byte_over_the_limit_is_rejected() {
    let mut response_headers = HeaderMap::new();
    let cookie = Cookie::new("abcd", vec![b'x'; RAW_LENGTH]);
    let err = write(&mut response_headers, cookie).unwrap_err();

    assert!(matches!(err, CookieError::ValueTooLong { length: 4097 }));
    assert!(response_headers.is_empty());
}

#[test]
fn attributes_count_towards_the_limit() {
    let cookie = Cookie::new("ab", vec![b'x'; RAW_LENGTH]);
    assert_eq!(encode(cookie.clone()).unwrap().len(), MAX_COOKIE_SIZE - 1);

    let err = encode(cookie.set_http_only(true)).unwrap_err();
    assert!(matches!(err, CookieError::ValueTooLong { .. }));
}

#[test]
fn the_signature_counts_towards_the_limit() {
    let key = demo_key();

    let mut response_headers = HeaderMap::new();
    let cookie = Cookie::new("abc", vec![b'x'; RAW_LENGTH - TAG_LENGTH]);
    write_signed(&mut response_headers, cookie, &key).unwrap();
    assert_eq!(response_headers[SET_COOKIE].len(), MAX_COOKIE_SIZE);

    let mut response_headers = HeaderMap::new();
    let cookie = Cookie::new("abc", vec![b'x'; RAW_LENGTH - TAG_LENGTH + 1]);
    let err = write_signed(&mut response_headers, cookie, &key).unwrap_err();
    assert!(matches!(err, CookieError::ValueTooLong { length: 4100 }));
    assert!(response_headers.is_empty());
}
