use frontend::App;
use yew::Renderer;

fn main() {
    // Initialize the logger for WebAssembly
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("moodspin {}", env!("CARGO_PKG_VERSION"));

    Renderer::<App>::new().render();
}
