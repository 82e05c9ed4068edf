use sessfile::{Config, FileStore};

fn main() {
    let conf = Config {
        path: "/tmp/sessfile-demo".into(),
        ..Default::default()
    };
    let store = FileStore::open(conf).unwrap();

    let mut record = store.create("demo-1");
    record.set_attribute("user", b"alice".to_vec());
    if let Err(e) = store.write(&record) {
        panic!("{}", e)
    }

    match store.read("demo-1") {
        Some(r) => println!("record found: `{}` with {} attribute(s)", r.id(), r.attributes().len()),
        None => println!("given record not found: `demo-1`"),
    }
}
