use clap::CommandFactory;

#[allow(dead_code)]
#[path = "src/cli.rs"]
mod cli;

fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir =
        std::path::PathBuf::from(std::env::var_os("OUT_DIR").ok_or(std::io::ErrorKind::NotFound)?);

    let mut buffer = Vec::new();
    clap_mangen::Man::new(cli::Cli::command()).render(&mut buffer)?;

    std::fs::write(out_dir.join("pagesmith.1"), buffer)?;
    Ok(())
}
