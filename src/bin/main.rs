#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use embassy_time::Timer;
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    clock::CpuClock,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    spi::master::Spi,
    time::Rate,
    timer::timg::TimerGroup,
};
use esp_radio::wifi::{ClientConfig, ModeConfig};
use log::{LevelFilter, error, info, warn};
use max7219::Config as ChainConfig;
use static_cell::StaticCell;
use wordseek_core::{
    board::SegmentDriver,
    config::GameConfig,
    game::{Flow, WordGame},
    graphics::{BOOT_ANIMATION, BOOT_FRAME_MS, BOOT_HOLD_MS},
    input::{DebounceConfig, Dispatcher, EVENT_QUEUE_CAPACITY, HoldRepeat, InputEvent},
};
use wordseek_hal_esp32s3::{
    input::pad::InputPad,
    network::{NetworkStatus, WifiConfig, word_api::Endpoint},
    platform::{display::MatrixChain, leds::OptionLeds},
};

use input_task::{ChannelSink, ChannelSource};
use word_client::WordClient;

#[path = "main/input_task.rs"]
mod input_task;
#[path = "main/wifi.rs"]
mod wifi;
#[path = "main/word_client.rs"]
mod word_client;

const DISPLAY_SPI_HZ: u32 = 1_000_000;
const CHAIN_LEN: usize = 10;
// Modules are mounted upside down on the board.
const CHAIN_MIRRORED: bool = true;

const WIFI_SSID: &str = env!(
    "WORDSEEK_WIFI_SSID",
    "Set WORDSEEK_WIFI_SSID in your environment before building/flashing."
);
const WIFI_PASSWORD: &str = env!(
    "WORDSEEK_WIFI_PASSWORD",
    "Set WORDSEEK_WIFI_PASSWORD in your environment before building/flashing."
);
const WIFI_CONFIG: WifiConfig = WifiConfig::new(WIFI_SSID, WIFI_PASSWORD);
const API_ADDR: &str = env!(
    "WORDSEEK_API_ADDR",
    "Set WORDSEEK_API_ADDR (ip:port of the word proxy) before building/flashing."
);
const API_KEY: &str = env!(
    "WORDSEEK_API_KEY",
    "Set WORDSEEK_API_KEY in your environment before building/flashing."
);
const ENDPOINT: Endpoint = Endpoint {
    host: API_ADDR,
    api_key: API_KEY,
};

static NETWORK: NetworkStatus = NetworkStatus::new();
static NET_RESOURCES: StaticCell<embassy_net::StackResources<4>> = StaticCell::new();
static EVENTS: Channel<CriticalSectionRawMutex, InputEvent, EVENT_QUEUE_CAPACITY> = Channel::new();

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

async fn halt(reason: &str) -> ! {
    error!("boot: {} failed, halting", reason);
    loop {
        Timer::after_secs(1).await;
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    esp_println::println!("boot: wordseek starting");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // esp-radio requires an allocator.
    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 65536);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Matrix chain wiring: DIN=GPIO11, CS=GPIO10, CLK=GPIO12
    let spi_config = esp_hal::spi::master::Config::default()
        .with_frequency(Rate::from_hz(DISPLAY_SPI_HZ))
        // MAX7219 latches on the rising clock edge, CPOL=0 CPHA=0.
        .with_mode(esp_hal::spi::Mode::_0);
    let spi = Spi::new(peripherals.SPI2, spi_config)
        .unwrap()
        .with_sck(peripherals.GPIO12)
        .with_mosi(peripherals.GPIO11);
    let cs = Output::new(peripherals.GPIO10, Level::High, OutputConfig::default());
    let device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();

    let mut chain = MatrixChain::new(
        device,
        ChainConfig::default()
            .with_chain_len(CHAIN_LEN)
            .with_mirrored(CHAIN_MIRRORED)
            .with_intensity(GameConfig::default().default_brightness),
    );
    if let Err(err) = chain.initialize() {
        error!("display: initialize failed err={:?}", err);
    }

    for frame in BOOT_ANIMATION {
        if let Err(err) = chain.fill(frame) {
            warn!("display: boot frame failed err={:?}", err);
        }
        Timer::after_millis(BOOT_FRAME_MS).await;
    }
    Timer::after_millis(BOOT_HOLD_MS).await;
    if let Err(err) = chain.clear_all() {
        warn!("display: clear after boot failed err={:?}", err);
    }

    // Buttons A..D, then joystick left, right, up, down. All active low.
    let input_cfg = InputConfig::default().with_pull(Pull::Up);
    let pad = InputPad::new([
        Input::new(peripherals.GPIO13, input_cfg),
        Input::new(peripherals.GPIO14, input_cfg),
        Input::new(peripherals.GPIO7, input_cfg),
        Input::new(peripherals.GPIO15, input_cfg),
        Input::new(peripherals.GPIO3, input_cfg),
        Input::new(peripherals.GPIO6, input_cfg),
        Input::new(peripherals.GPIO5, input_cfg),
        Input::new(peripherals.GPIO4, input_cfg),
    ]);

    let leds = OptionLeds::new([
        Output::new(peripherals.GPIO16, Level::Low, OutputConfig::default()),
        Output::new(peripherals.GPIO17, Level::Low, OutputConfig::default()),
        Output::new(peripherals.GPIO18, Level::Low, OutputConfig::default()),
        Output::new(peripherals.GPIO8, Level::Low, OutputConfig::default()),
    ]);

    let game_config = GameConfig::default();
    let dispatcher = Dispatcher::new(ChannelSink(EVENTS.sender()), DebounceConfig::default());
    let repeat = HoldRepeat::new(game_config.hold_repeat_ms);

    let Some(remote) = word_client::parse_remote(API_ADDR) else {
        halt("WORDSEEK_API_ADDR parse").await
    };

    let radio = match esp_radio::init() {
        Ok(radio) => radio,
        Err(err) => {
            info!("esp-radio init failed: {:?}", err);
            halt("radio init").await
        }
    };

    let (mut wifi_controller, interfaces) =
        match esp_radio::wifi::new(&radio, peripherals.WIFI, esp_radio::wifi::Config::default()) {
            Ok(parts) => parts,
            Err(err) => {
                info!("wifi peripheral init failed: {:?}", err);
                halt("wifi init").await
            }
        };

    let client_config = ClientConfig::default()
        .with_ssid(WIFI_CONFIG.ssid.into())
        .with_password(WIFI_CONFIG.password.into());
    if let Err(err) = wifi_controller.set_config(&ModeConfig::Client(client_config)) {
        info!("wifi mode config failed: {:?}", err);
        halt("wifi config").await
    }

    let stack_config = embassy_net::Config::dhcpv4(Default::default());
    let (stack, mut net_runner) = embassy_net::new(
        interfaces.sta,
        stack_config,
        NET_RESOURCES.init(embassy_net::StackResources::<4>::new()),
        0x3B1D_77C0_52E4_A90F,
    );

    let words = WordClient::new(stack, ENDPOINT, remote, &NETWORK);
    let mut game = WordGame::new(chain, words, leds, game_config);

    info!(
        "boot: ready spi_hz={} chain_len={} api={}",
        DISPLAY_SPI_HZ, CHAIN_LEN, API_ADDR
    );
    info!("Display pins: DIN=GPIO11 CS=GPIO10 CLK=GPIO12");
    info!("Button pins: A=GPIO13 B=GPIO14 C=GPIO7 D=GPIO15 LEDs=GPIO16,17,18,8");
    info!("Joystick pins: L=GPIO3 R=GPIO6 U=GPIO5 D=GPIO4");

    let net_future = net_runner.run();
    let wifi_future = wifi::supervise(&mut wifi_controller, stack, &NETWORK);
    let input_future = input_task::input_loop(pad, dispatcher, repeat);
    let game_future = async {
        let mut source = ChannelSource(EVENTS.receiver());
        game.start();
        if game.run(&mut source).await == Flow::Exit {
            info!("game: exited, idling");
        }
        core::future::pending::<()>().await
    };

    let _ = embassy_futures::join::join4(net_future, wifi_future, input_future, game_future).await;
    unreachable!()
}
