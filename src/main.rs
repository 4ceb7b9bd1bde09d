use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error + Sync + Send>> {
    // Parse the command line arguments.
    let args = typescript_language_server::LspArgs::parse();

    // Start the LSP server.
    typescript_language_server::start_lsp(&args)?;

    // Return success.
    Ok(())
}
