mod decoded;

pub use decoded::DecodedToken;
