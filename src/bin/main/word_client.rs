use core::net::SocketAddrV4;

use embassy_net::{IpAddress, IpEndpoint, Stack, tcp::TcpSocket};
use embassy_time::{Duration as EmbassyDuration, WithTimeout};
use embedded_io_async::Write;
use heapless::String;
use log::{info, warn};
use wordseek_core::{
    board::WORD_LEN,
    service::{Verdict, WordService},
};
use wordseek_hal_esp32s3::network::{
    NetworkStatus,
    word_api::{
        ApiError, Endpoint, MAX_REQUEST_BYTES, MAX_RESPONSE_BYTES, Request, build_check_request,
        build_fetch_request, parse_response, parse_verdict, parse_word,
    },
};

const SOCKET_TIMEOUT_MS: u64 = 5_000;
const EXCHANGE_TIMEOUT_MS: u64 = 8_000;

/// Parses `a.b.c.d:port` into a TCP endpoint.
pub fn parse_remote(addr: &str) -> Option<IpEndpoint> {
    let addr: SocketAddrV4 = addr.parse().ok()?;
    Some(IpEndpoint::new(IpAddress::Ipv4(*addr.ip()), addr.port()))
}

/// One short-lived TCP connection per request to the LAN word proxy.
pub struct WordClient<'a> {
    stack: Stack<'a>,
    endpoint: Endpoint,
    remote: IpEndpoint,
    status: &'static NetworkStatus,
}

impl<'a> WordClient<'a> {
    pub fn new(
        stack: Stack<'a>,
        endpoint: Endpoint,
        remote: IpEndpoint,
        status: &'static NetworkStatus,
    ) -> Self {
        Self {
            stack,
            endpoint,
            remote,
            status,
        }
    }

    async fn exchange<T>(
        &mut self,
        request: Request,
        parse: impl FnOnce(&str) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        if !self.status.is_online() {
            return Err(ApiError::Offline);
        }

        let mut response = [0u8; MAX_RESPONSE_BYTES];
        let outcome = match self
            .round_trip(&request, &mut response)
            .with_timeout(EmbassyDuration::from_millis(EXCHANGE_TIMEOUT_MS))
            .await
        {
            Ok(Ok(len)) => parse_response(&response[..len]).and_then(|reply| parse(reply.body)),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(ApiError::Timeout),
        };

        // A well-formed refusal still proves the proxy is up.
        let reachable = !matches!(outcome, Err(ApiError::Transport | ApiError::Timeout));
        let failures = self.status.record_service(reachable);
        if let Err(err) = &outcome {
            warn!(
                "net: word service request failed err={} consecutive_failures={}",
                err, failures
            );
        }
        outcome
    }

    async fn round_trip(&self, request: &str, response: &mut [u8]) -> Result<usize, ApiError> {
        let mut rx_buffer = [0u8; MAX_RESPONSE_BYTES];
        let mut tx_buffer = [0u8; MAX_REQUEST_BYTES];
        let mut socket = TcpSocket::new(self.stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(EmbassyDuration::from_millis(SOCKET_TIMEOUT_MS)));

        socket.connect(self.remote).await.map_err(|err| {
            info!("net: connect failed remote={} err={:?}", self.remote, err);
            ApiError::Transport
        })?;
        socket
            .write_all(request.as_bytes())
            .await
            .map_err(|_| ApiError::Transport)?;
        socket.flush().await.map_err(|_| ApiError::Transport)?;

        let mut filled = 0usize;
        while filled < response.len() {
            match socket.read(&mut response[filled..]).await {
                Ok(0) => break,
                Ok(read) => filled += read,
                Err(_) => {
                    socket.abort();
                    return Err(ApiError::Transport);
                }
            }
        }
        socket.close();
        Ok(filled)
    }
}

impl WordService for WordClient<'_> {
    type Error = ApiError;

    async fn fetch_word(&mut self) -> Result<String<WORD_LEN>, ApiError> {
        let request = build_fetch_request(&self.endpoint)?;
        let word = self.exchange(request, parse_word).await?;
        info!("net: fetched word");
        Ok(word)
    }

    async fn check_word(&mut self, guess: &str) -> Result<Verdict, ApiError> {
        let request = build_check_request(&self.endpoint, guess)?;
        let verdict = self.exchange(request, parse_verdict).await?;
        info!("net: checked guess={} verdict={}", guess, verdict);
        Ok(verdict)
    }
}
