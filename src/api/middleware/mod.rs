pub mod annotate;
pub mod geoip;

pub use annotate::{
    RemoteAddr, ResponseHeaderPolicy, annotate_request, annotate_response, request_header_name,
    response_header_name, strip_request_headers,
};
pub use geoip::{GeoIp2, GeoIp2Middleware};
