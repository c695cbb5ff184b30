// Test case for NO_PRINTLN lint

fn bad_println(path: &str) {
    println!("denied {}", path);
}

fn bad_eprintln() {
    eprintln!("session check failed");
}

fn bad_dbg() {
    let token = "tok-123";
    dbg!(token);
}

// Good: structured, filtered by the subscriber
fn good_tracing(path: &str) {
    tracing::warn!(path = %path, deny_kind = "missing_credential", "denied");
}

fn main() {
    bad_println("/admin/users");
    bad_eprintln();
    bad_dbg();
    good_tracing("/admin/users");
}
