//! Linux framebuffer output (`/dev/fbN`)

use super::Renderer;
use crate::error::{Error, Result};
use crate::grid::Grid;
use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;
use std::ptr::{self, NonNull};

const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;
const BYTES_PER_PIXEL: usize = 4;

/// `struct fb_bitfield` from `<linux/fb.h>`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
struct FbBitfield {
    offset: u32,
    length: u32,
    msb_right: u32,
}

/// `struct fb_var_screeninfo` from `<linux/fb.h>`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
struct FbVarScreenInfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitfield,
    green: FbBitfield,
    blue: FbBitfield,
    transp: FbBitfield,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

/// A writable 32-bit pixel buffer that can be pushed to its device.
pub trait PixelSink {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    /// Row-major pixels, `rows * cols` long
    fn pixels_mut(&mut self) -> &mut [u32];
    fn flush(&mut self) -> io::Result<()>;
}

/// Memory-mapped 32 bpp framebuffer device
pub struct Framebuffer {
    _file: File,
    pixels: NonNull<u32>,
    rows: usize,
    cols: usize,
}

impl Framebuffer {
    /// Query and map an already opened (read/write) framebuffer device.
    pub fn new(file: File) -> Result<Self> {
        let info = screen_info(&file).map_err(Error::ScreenInfo)?;
        if info.bits_per_pixel != 32 {
            return Err(Error::UnsupportedDepth {
                bits: info.bits_per_pixel,
            });
        }

        let rows = info.yres as usize;
        let cols = info.xres as usize;
        if rows == 0 || cols == 0 {
            return Err(Error::DeviceSize { rows, cols });
        }

        let len = rows * cols * BYTES_PER_PIXEL;
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                0,
            )
        };
        if addr == libc::MAP_FAILED {
            return Err(Error::Map(io::Error::last_os_error()));
        }
        let pixels = NonNull::new(addr.cast::<u32>())
            .ok_or_else(|| Error::Map(io::Error::other("mmap returned null")))?;

        log::info!("mapped framebuffer {}x{} at 32 bpp", cols, rows);
        Ok(Self {
            _file: file,
            pixels,
            rows,
            cols,
        })
    }

    fn byte_len(&self) -> usize {
        self.rows * self.cols * BYTES_PER_PIXEL
    }
}

fn screen_info(file: &File) -> io::Result<FbVarScreenInfo> {
    let mut info = FbVarScreenInfo::default();
    let result = unsafe {
        libc::ioctl(
            file.as_raw_fd(),
            FBIOGET_VSCREENINFO as _,
            &mut info as *mut FbVarScreenInfo,
        )
    };
    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(info)
    }
}

impl PixelSink for Framebuffer {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn pixels_mut(&mut self) -> &mut [u32] {
        // The mapping is rows * cols * 4 bytes and lives until drop.
        unsafe { std::slice::from_raw_parts_mut(self.pixels.as_ptr(), self.rows * self.cols) }
    }

    fn flush(&mut self) -> io::Result<()> {
        let result = unsafe {
            libc::msync(
                self.pixels.as_ptr().cast::<libc::c_void>(),
                self.byte_len(),
                libc::MS_SYNC,
            )
        };
        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.pixels.as_ptr().cast::<libc::c_void>(), self.byte_len());
        }
    }
}

/// Writes `color * cell` for every cell, then flushes the sink.
pub struct FramebufferRenderer<S: PixelSink> {
    sink: S,
    color: u32,
}

impl<S: PixelSink> FramebufferRenderer<S> {
    pub fn new(sink: S, color: u32) -> Self {
        Self { sink, color }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: PixelSink> Renderer for FramebufferRenderer<S> {
    fn draw(&mut self, grid: &Grid) -> Result<()> {
        debug_assert_eq!((grid.rows(), grid.cols()), (self.sink.rows(), self.sink.cols()));
        let color = self.color;
        for (px, &cell) in self.sink.pixels_mut().iter_mut().zip(grid.cells()) {
            *px = color * u32::from(cell);
        }
        self.sink.flush()?;
        Ok(())
    }
}
