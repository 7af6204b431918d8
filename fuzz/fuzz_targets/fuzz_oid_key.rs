#![no_main]

use libfuzzer_sys::fuzz_target;

use pass_persist::oid::OidKey;
use pass_persist::value::ValueType;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Split the input into an OID and a base so ordering and subtree checks
    // see arbitrary pairs
    let (left, right) = s.split_once(' ').unwrap_or((s, ""));
    let a = OidKey::new(left);
    let b = OidKey::new(right);

    let _ = a.comparable_form();
    assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    assert_eq!(a.cmp(&b).is_eq(), a == b);
    assert!(a.starts_with(&a));
    let _ = a.starts_with(&b);

    let _ = ValueType::parse(s);
});
