use std::{
    fs::{self, OpenOptions},
    path::Path,
};

const CLIENT_PATH: &str = "res/client";

fn main() {
    println!("cargo:rerun-if-changed={CLIENT_PATH}");
    let out_dir = std::env::var("OUT_DIR").expect("Failed to find OUT_DIR");
    let client_tarball_path = Path::new(&out_dir).join("client.tar");

    let client_tarball_writer = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(client_tarball_path)
        .expect("Failed to open client tarball");

    let mut tarball = tar::Builder::new(client_tarball_writer);
    let entries = fs::read_dir(CLIENT_PATH).expect("Failed to list client files");
    for entry in entries {
        let entry = entry.expect("Failed to read client dir entry");
        let name = entry.file_name();
        // Editor swap files and the like
        if name.to_string_lossy().starts_with('.') || !entry.path().is_file() {
            continue;
        }
        tarball
            .append_path_with_name(entry.path(), &name)
            .expect("Failed to add client file");
    }
    tarball.finish().expect("Failed to finish tarball");
}
