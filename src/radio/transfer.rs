//! Transmit and receive.
//!
//! Both directions are bounded poll loops over a status register:
//!
//! ```text
//! transmit: FIFO burst write -> poll MARCSTATE until IDLE -> SFTX
//! receive:  poll RXBYTES until non-zero -> length byte -> burst read -> SFRX
//! ```
//!
//! Each poll that finds no progress sleeps for the configured interval on
//! the caller's delay before polling again. The loops give up once the
//! sleeps add up to the timeout, see [`PollBudget`].

use alloc::vec;
use core::time::Duration;

use super::Radio;
use crate::bus::BusTransport;
use crate::error::Error;
use crate::packet::ReceivedPacket;
use crate::poll::{Poll, PollBudget};
use crate::registers::{FifoBytes, MachineState, Pointer, StatusRegister, Strobe, FIFO_SIZE};

impl<B: BusTransport> Radio<B> {
    fn start_transmit(&mut self, payload: &[u8]) -> Result<(), Error<B::Error>> {
        if payload.len() > FIFO_SIZE {
            return Err(Error::PayloadTooLarge { len: payload.len() });
        }
        self.device.write_burst(Pointer::Fifo.addr(), payload)?;
        log::debug!("transmitting {} byte(s)", payload.len());
        Ok(())
    }

    fn transmit_done(&mut self) -> Result<bool, Error<B::Error>> {
        let raw = self.device.read_status(StatusRegister::Marcstate)?;
        Ok(MachineState::try_from(raw) == Ok(MachineState::Idle))
    }

    fn finish_transmit(&mut self) -> Result<(), Error<B::Error>> {
        self.device.strobe(Strobe::Sftx)
    }

    fn receive_ready(&mut self) -> Result<bool, Error<B::Error>> {
        let rx = FifoBytes::from_bits_retain(self.device.read_status(StatusRegister::Rxbytes)?);
        if rx.overflowed() {
            log::warn!("RX FIFO overflow flagged with {} byte(s) pending", rx.count());
        }
        Ok(rx.count() > 0)
    }

    fn drain_packet(&mut self, status_appended: bool) -> Result<ReceivedPacket, Error<B::Error>> {
        let length = self.device.read_single(Pointer::Fifo.addr())?;
        let trailer = if status_appended { 2 } else { 0 };

        let mut body = vec![0; length as usize + trailer];
        if !body.is_empty() {
            self.device.read_burst(Pointer::Fifo.addr(), &mut body)?;
        }
        self.device.strobe(Strobe::Sfrx)?;

        log::debug!("received {length} byte(s)");
        Ok(ReceivedPacket::from_fifo(length, body, status_appended))
    }

    /// Sends `payload` and waits for the chip to return to IDLE.
    ///
    /// The payload is written to the TX FIFO as is. In variable length mode
    /// its first byte must be the length. No STX is issued here, see
    /// [`enter_tx`](Radio::enter_tx); a chip that is already IDLE completes
    /// on the first poll. The TX FIFO is flushed once the chip is idle again.
    ///
    /// # Errors
    /// * `Error::PayloadTooLarge` - More than 64 bytes, nothing was written
    /// * `Error::TxTimeout` - MARCSTATE did not report IDLE within `timeout`.
    ///   The TX FIFO has not been flushed.
    pub fn transmit<D>(
        &mut self,
        payload: &[u8],
        timeout: Duration,
        delay: &mut D,
    ) -> Result<(), Error<B::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.start_transmit(payload)?;
        let mut budget = PollBudget::new(timeout, self.poll_interval_us);

        while !self.transmit_done()? {
            match budget.step() {
                Poll::Wait(us) => delay.delay_us(us),
                Poll::Expired => {
                    log::warn!("transmit timed out after {timeout:?}");
                    return Err(Error::TxTimeout);
                }
            }
        }
        self.finish_transmit()
    }

    /// Async version of [`transmit`](Radio::transmit), yielding on `delay`
    /// between polls.
    pub async fn transmit_async<D>(
        &mut self,
        payload: &[u8],
        timeout: Duration,
        delay: &mut D,
    ) -> Result<(), Error<B::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.start_transmit(payload)?;
        let mut budget = PollBudget::new(timeout, self.poll_interval_us);

        while !self.transmit_done()? {
            match budget.step() {
                Poll::Wait(us) => delay.delay_us(us).await,
                Poll::Expired => {
                    log::warn!("transmit timed out after {timeout:?}");
                    return Err(Error::TxTimeout);
                }
            }
        }
        self.finish_transmit()
    }

    /// Waits for a packet and drains it from the RX FIFO.
    ///
    /// The chip must already be receiving, see [`enter_rx`](Radio::enter_rx).
    /// Whether status bytes follow the payload is read from
    /// PKTCTRL1.APPEND_STATUS before polling starts.
    ///
    /// # Errors
    /// * `Error::ReceiveTimeout` - RXBYTES stayed zero for `timeout`
    pub fn receive<D>(
        &mut self,
        timeout: Duration,
        delay: &mut D,
    ) -> Result<ReceivedPacket, Error<B::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let status_appended = self.append_status()?;
        let mut budget = PollBudget::new(timeout, self.poll_interval_us);

        while !self.receive_ready()? {
            match budget.step() {
                Poll::Wait(us) => delay.delay_us(us),
                Poll::Expired => {
                    log::warn!("receive timed out after {timeout:?}");
                    return Err(Error::ReceiveTimeout);
                }
            }
        }
        self.drain_packet(status_appended)
    }

    /// Async version of [`receive`](Radio::receive), yielding on `delay`
    /// between polls.
    pub async fn receive_async<D>(
        &mut self,
        timeout: Duration,
        delay: &mut D,
    ) -> Result<ReceivedPacket, Error<B::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let status_appended = self.append_status()?;
        let mut budget = PollBudget::new(timeout, self.poll_interval_us);

        while !self.receive_ready()? {
            match budget.step() {
                Poll::Wait(us) => delay.delay_us(us).await,
                Poll::Expired => {
                    log::warn!("receive timed out after {timeout:?}");
                    return Err(Error::ReceiveTimeout);
                }
            }
        }
        self.drain_packet(status_appended)
    }
}
