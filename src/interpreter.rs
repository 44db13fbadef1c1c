use crate::common::{Request, Response};
use crate::error::CommandError;
use crate::store::Store;

/// Applies a parsed request to the store.
pub fn execute(request: Request, store: &Store) -> Response {
    match request {
        Request::Put { key, value } => {
            store.put(key, value);
            Response::Ok
        }
        Request::Get { key } => match store.get(&key) {
            Some(value) => Response::Value(value),
            None => CommandError::KeyNotFound.into(),
        },
        Request::Delete { key } => {
            store.delete(&key);
            Response::Ok
        }
    }
}

/// Maps a raw request line to the response line sent back to its origin.
///
/// Malformed lines never reach the store.
pub fn interpret(line: &str, store: &Store) -> String {
    let response = match Request::parse(line) {
        Ok(request) => execute(request, store),
        Err(e) => e.into(),
    };
    response.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get() {
        let store = Store::new();
        assert_eq!(interpret("PUT a hello world", &store), "OK");
        assert_eq!(interpret("GET a", &store), "hello world");
    }

    #[test]
    fn get_missing() {
        let store = Store::new();
        assert_eq!(interpret("GET missing", &store), "ERROR: Key not found");
    }

    #[test]
    fn delete_then_get() {
        let store = Store::new();
        interpret("PUT a 1", &store);
        assert_eq!(interpret("DELETE a", &store), "OK");
        assert_eq!(interpret("GET a", &store), "ERROR: Key not found");
        assert_eq!(interpret("DELETE a", &store), "OK");
        assert!(store.is_empty());
    }

    #[test]
    fn mixed_case_verbs_behave_identically() {
        let store = Store::new();
        assert_eq!(interpret("put k v1", &store), "OK");
        assert_eq!(interpret("Get k", &store), "v1");
        assert_eq!(interpret("Put k v2", &store), "OK");
        assert_eq!(interpret("GET k", &store), "v2");
        assert_eq!(interpret("dElEtE k", &store), "OK");
        assert_eq!(interpret("get k", &store), "ERROR: Key not found");
    }

    #[test]
    fn trailing_newline_is_part_of_the_key() {
        let store = Store::new();
        assert_eq!(interpret("PUT a 1", &store), "OK");
        assert_eq!(interpret("GET a\n", &store), "ERROR: Key not found");
        assert_eq!(interpret("PUT a\n 2", &store), "OK");
        assert_eq!(interpret("GET a\n", &store), "2");
        assert_eq!(interpret("GET a", &store), "1");
    }

    #[test]
    fn malformed_lines_leave_store_untouched() {
        let store = Store::new();
        store.put("a".to_owned(), "keep".to_owned());

        let cases = [
            ("PUT onlykey", "ERROR: Invalid PUT format"),
            ("PUT", "ERROR: Invalid PUT format"),
            ("GET", "ERROR: Invalid GET format"),
            ("GET a extra", "ERROR: Invalid GET format"),
            ("DELETE", "ERROR: Invalid DELETE format"),
            ("DELETE a extra", "ERROR: Invalid DELETE format"),
            ("FOO a b", "ERROR: Unknown command"),
            ("", "ERROR: Unknown command"),
        ];
        for (line, expected) in cases {
            assert_eq!(interpret(line, &store), expected, "line {line:?}");
        }

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), Some("keep".to_owned()));
    }
}
