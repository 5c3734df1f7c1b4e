use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};

use super::sink::create_sink;
use super::types::{AudioCmd, PlaybackHandle};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut current: Option<PathBuf> = None;
        let mut paused = true;
        let mut sink: Option<Sink> = None;

        // Spawn a ticker thread to update playback_info.elapsed periodically.
        let info_for_ticker_clone = playback_info.clone();
        thread::spawn(move || loop {
            thread::sleep(Duration::from_millis(500));
            let mut info = info_for_ticker_clone.lock().unwrap();
            if info.playing {
                info.elapsed = info.elapsed + Duration::from_millis(500);
            }
        });

        fn do_play(
            path: PathBuf,
            stream: &rodio::OutputStream,
            sink: &mut Option<Sink>,
            current: &mut Option<PathBuf>,
            paused: &mut bool,
            playback_info: &PlaybackHandle,
        ) {
            if let Some(s) = sink.as_ref() {
                s.stop();
            }

            let new_sink = match create_sink(stream, &path) {
                Ok(s) => s,
                Err(_) => {
                    // Undecodable file: land in the stopped state.
                    do_stop(sink, current, paused, playback_info);
                    return;
                }
            };

            new_sink.play();
            *sink = Some(new_sink);
            *current = Some(path.clone());
            *paused = false;

            if let Ok(mut info) = playback_info.lock() {
                info.path = Some(path);
                info.elapsed = Duration::ZERO;
                info.playing = true;
            }
        }

        fn do_stop(
            sink: &mut Option<Sink>,
            current: &mut Option<PathBuf>,
            paused: &mut bool,
            playback_info: &PlaybackHandle,
        ) {
            if let Some(s) = sink.as_ref() {
                s.stop();
            }
            *sink = None;
            *current = None;
            *paused = true;
            if let Ok(mut info) = playback_info.lock() {
                info.path = None;
                info.elapsed = Duration::ZERO;
                info.playing = false;
            }
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Play(path) => {
                        do_play(
                            path,
                            &stream,
                            &mut sink,
                            &mut current,
                            &mut paused,
                            &playback_info,
                        );
                    }

                    AudioCmd::Stop => {
                        do_stop(&mut sink, &mut current, &mut paused, &playback_info);
                    }

                    AudioCmd::TogglePause => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                            } else {
                                s.pause();
                            }
                            paused = !paused;
                            if let Ok(mut info) = playback_info.lock() {
                                info.playing = !paused;
                            }
                        }
                    }

                    AudioCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // periodic check: the single track ended, there is no queue
                    // to advance into, so just land in the stopped state.
                    let ended = sink.as_ref().is_some_and(|s| !paused && s.empty());
                    if ended {
                        do_stop(&mut sink, &mut current, &mut paused, &playback_info);
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
