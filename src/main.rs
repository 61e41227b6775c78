use clap::Parser;
use log::info;
use softpipe::core::renderer::FramePresenter;
use softpipe::io::cli::Cli;
use softpipe::io::error::Result;
use softpipe::io::output::PngPresenter;
use softpipe::ui;

fn run(cli: &Cli) -> Result<()> {
    let (config, base_dir) = cli.load_config()?;
    let (mut renderer, scene) = config.build(&base_dir)?;

    if cli.headless {
        let stats = scene.render_frame(&mut renderer);
        info!(
            "渲染完成: {} 个三角形，耗时 {:?}",
            stats.triangles_rendered, stats.elapsed
        );

        let mut presenter = PngPresenter::new(&cli.output);
        if cli.save_depth {
            presenter = presenter.with_depth();
        }
        presenter.present(renderer.frame_buffer())?;
        Ok(())
    } else {
        info!("启动GUI模式...");
        ui::start_gui(renderer, scene, cli.output_dir())
    }
}

fn main() -> std::result::Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run(&cli).map_err(|e| e.to_string())
}
