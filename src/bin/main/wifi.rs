use embassy_futures::select::select;
use embassy_net::Stack;
use embassy_time::{Duration as EmbassyDuration, Timer, WithTimeout};
use esp_radio::wifi::WifiController;
use log::{info, warn};
use wordseek_hal_esp32s3::network::{Backoff, NetworkStatus};

const BACKOFF_MIN_SECS: u64 = 2;
const BACKOFF_MAX_SECS: u64 = 60;
const DHCP_TIMEOUT_SECS: u64 = 15;
const ASSOCIATION_POLL_MS: u64 = 1_000;

#[derive(Clone, Copy, Debug)]
enum JoinError {
    Start,
    Associate,
    Dhcp,
}

async fn join(controller: &mut WifiController<'_>, stack: Stack<'_>) -> Result<(), JoinError> {
    if !controller.is_started().unwrap_or(false) {
        controller.start_async().await.map_err(|err| {
            warn!("wifi: start failed err={:?}", err);
            JoinError::Start
        })?;
    }

    controller.connect_async().await.map_err(|err| {
        warn!("wifi: associate failed err={:?}", err);
        JoinError::Associate
    })?;

    stack
        .wait_config_up()
        .with_timeout(EmbassyDuration::from_secs(DHCP_TIMEOUT_SECS))
        .await
        .map_err(|_| JoinError::Dhcp)
}

/// Resolves once the access point drops us.
async fn association_lost(controller: &mut WifiController<'_>) {
    while matches!(controller.is_connected(), Ok(true)) {
        Timer::after_millis(ASSOCIATION_POLL_MS).await;
    }
}

/// Keeps the station joined. The word client only ever sees `online`.
pub async fn supervise(
    controller: &mut WifiController<'_>,
    stack: Stack<'_>,
    status: &'static NetworkStatus,
) -> ! {
    let mut backoff = Backoff::new(BACKOFF_MIN_SECS, BACKOFF_MAX_SECS);

    loop {
        match join(controller, stack).await {
            Ok(()) => {
                if let Some(config) = stack.config_v4() {
                    info!("wifi: online address={}", config.address);
                }
                backoff.reset();
                status.set_online(true);

                select(stack.wait_config_down(), association_lost(controller)).await;
                status.set_online(false);
                info!("wifi: offline, rejoining");
            }
            Err(err) => {
                let delay_secs = backoff.next_delay_secs();
                info!(
                    "wifi: join failed stage={:?} attempt={} retry_in={}s",
                    err,
                    backoff.attempts(),
                    delay_secs
                );
                let _ = controller.disconnect_async().await;
                Timer::after_secs(delay_secs).await;
                continue;
            }
        }

        let _ = controller.disconnect_async().await;
    }
}
